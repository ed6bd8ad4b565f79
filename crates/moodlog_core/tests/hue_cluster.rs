use moodlog_core::{
    circular_mean, monthly_families, monthly_stops, monthly_top3, Entry, FALLBACK_PALETTE,
};

fn hued(date: &str, hue: i64) -> Entry {
    Entry::new(date, ["😀"], Some(hue), None, 1)
}

fn month_of(hues: &[i64]) -> Vec<Entry> {
    hues.iter()
        .enumerate()
        .map(|(index, hue)| hued(&format!("2024-05-{:02}", index + 1), *hue))
        .collect()
}

#[test]
fn empty_month_falls_back_to_default_palette() {
    assert_eq!(monthly_top3(&[], "2024-05"), vec![220.0, 300.0, 40.0]);
    assert_eq!(monthly_stops(&[], "2024-05"), FALLBACK_PALETTE.to_vec());
}

#[test]
fn month_without_hues_or_matching_dates_falls_back() {
    let entries = vec![
        Entry::new("2024-05-01", ["😀"], None, None, 1),
        hued("2024-04-30", 100),
        hued("2024-06-01", 100),
    ];
    assert_eq!(monthly_top3(&entries, "2024-05"), FALLBACK_PALETTE.to_vec());
    assert_eq!(monthly_stops(&entries, "2024-05"), FALLBACK_PALETTE.to_vec());
}

#[test]
fn clusters_reduce_to_representative_family_hues() {
    let entries = month_of(&[32, 40, 34, 210, 215, 220, 208]);

    let palette = monthly_top3(&entries, "2024-05");
    assert!(
        palette.iter().any(|hue| *hue > 190.0 && *hue < 230.0),
        "palette {palette:?} has no blue family"
    );
    // 208 falls in the 180-210 bucket on its own; the two full buckets tie
    // and keep ascending bucket order.
    assert_eq!(palette.len(), 3);
    assert!((palette[0] - 35.33).abs() < 0.1, "unexpected {palette:?}");
    assert!((palette[1] - 215.0).abs() < 1e-9, "unexpected {palette:?}");
    assert_eq!(palette[2], 208.0);
}

#[test]
fn keeps_at_most_three_families_ordered_by_count() {
    let entries = month_of(&[5, 100, 100, 200, 200, 200, 300, 300, 300, 300]);

    let families = monthly_families(&entries, "2024-05");
    let counts: Vec<usize> = families.iter().map(|family| family.count).collect();
    assert_eq!(counts, vec![4, 3, 2]);

    let palette = monthly_top3(&entries, "2024-05");
    let expected = [300.0, 200.0, 100.0];
    assert_eq!(palette.len(), expected.len());
    for (hue, want) in palette.iter().zip(expected) {
        assert!((hue - want).abs() < 1e-9, "unexpected {palette:?}");
    }
}

#[test]
fn equal_counts_prefer_lower_bucket() {
    let entries = month_of(&[250, 10, 130, 70]);
    assert_eq!(
        monthly_top3(&entries, "2024-05"),
        vec![10.0, 70.0, 130.0]
    );
}

#[test]
fn single_hue_bucket_returns_exact_value() {
    let entries = month_of(&[359]);
    assert_eq!(monthly_top3(&entries, "2024-05"), vec![359.0]);
}

#[test]
fn circular_mean_handles_wraparound_within_bucket() {
    let mean = circular_mean(&[0, 10, 20]).unwrap();
    assert!((mean - 10.0).abs() < 1e-9);

    let across_zero = circular_mean(&[340, 20]).unwrap();
    assert!(across_zero < 1e-9 || across_zero > 360.0 - 1e-9);
    assert!((0.0..360.0).contains(&across_zero));
}

#[test]
fn stops_use_fifteen_degree_midpoints() {
    let entries = month_of(&[0, 5, 14, 16, 200, 201, 202, 203, 300, 90, 45]);

    let stops = monthly_stops(&entries, "2024-05");
    assert_eq!(stops.len(), 5);
    assert_eq!(stops[0], 202.5);
    assert_eq!(stops[1], 7.5);
    assert_eq!(&stops[2..], &[22.5, 52.5, 97.5]);
}
