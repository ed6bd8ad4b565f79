use chrono::{Datelike, NaiveDate, Weekday};
use moodlog_core::calendar::window::{format_date, parse_date, today};
use moodlog_core::{
    add_days, can_edit, can_edit_on, fill_window, last7, month_dates_on, month_key_on,
    today_iso, week_dates_on, year_window_on, Entry,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn entry(date: &str) -> Entry {
    Entry::new(date, ["😀"], None, None, 1)
}

#[test]
fn add_days_crosses_month_year_and_leap_boundaries() {
    assert_eq!(add_days("2024-12-31", 1).as_deref(), Some("2025-01-01"));
    assert_eq!(add_days("2024-02-28", 1).as_deref(), Some("2024-02-29"));
    assert_eq!(add_days("2024-02-29", 1).as_deref(), Some("2024-03-01"));
    assert_eq!(add_days("2023-02-28", 1).as_deref(), Some("2023-03-01"));
    assert_eq!(add_days("2024-03-01", -1).as_deref(), Some("2024-02-29"));
    assert_eq!(add_days("2025-01-01", -366).as_deref(), Some("2024-01-01"));
}

#[test]
fn add_days_rejects_unparsable_dates() {
    assert_eq!(add_days("2024-02-30", 1), None);
    assert_eq!(add_days("not a date", 1), None);
}

#[test]
fn today_iso_matches_local_calendar() {
    let rendered = today_iso();
    assert_eq!(rendered.len(), 10);
    assert_eq!(parse_date(&rendered).map(format_date), Some(rendered.clone()));
    // The clock may tick past midnight between the two reads.
    let now = today();
    let yesterday = now.pred_opt().unwrap();
    assert!(rendered == format_date(now) || rendered == format_date(yesterday));
}

#[test]
fn can_edit_allows_only_today_and_yesterday() {
    let today = date(2024, 3, 1);

    assert!(can_edit_on(today, "2024-03-01"));
    assert!(can_edit_on(today, "2024-02-29"));
    assert!(!can_edit_on(today, "2024-02-28"));
    assert!(!can_edit_on(today, "2024-03-02"));
    assert!(!can_edit_on(today, "garbage"));
}

#[test]
fn can_edit_uses_current_day() {
    assert!(can_edit(&today_iso()));
    assert!(!can_edit("1999-01-01"));
}

#[test]
fn last7_returns_latest_seven_in_ascending_order() {
    let mut entries: Vec<Entry> = (1..=10)
        .map(|day| entry(&format!("2024-01-{day:02}")))
        .collect();
    entries.reverse();

    let recent = last7(&entries);
    let dates: Vec<&str> = recent.iter().map(Entry::date).collect();
    assert_eq!(
        dates,
        vec![
            "2024-01-04",
            "2024-01-05",
            "2024-01-06",
            "2024-01-07",
            "2024-01-08",
            "2024-01-09",
            "2024-01-10",
        ]
    );
}

#[test]
fn last7_ignores_calendar_gaps() {
    let entries = vec![entry("2023-06-01"), entry("2024-01-01")];
    assert_eq!(last7(&entries), entries);
    assert!(last7(&[]).is_empty());
}

#[test]
fn week_dates_are_monday_anchored() {
    // 2024-03-06 is a Wednesday.
    let today = date(2024, 3, 6);

    let current = week_dates_on(today, 0);
    assert_eq!(current.len(), 7);
    assert_eq!(current[0], "2024-03-04");
    assert_eq!(current[6], "2024-03-10");

    let previous = week_dates_on(today, 1);
    assert_eq!(previous[0], "2024-02-26");
    assert_eq!(previous[3], "2024-02-29");
    assert_eq!(previous[6], "2024-03-03");
    assert_eq!(parse_date(&previous[0]).unwrap().weekday(), Weekday::Mon);
}

#[test]
fn week_dates_on_sunday_stay_in_same_week() {
    let sunday = date(2024, 3, 10);
    assert_eq!(week_dates_on(sunday, 0)[0], "2024-03-04");
}

#[test]
fn month_key_steps_back_across_years() {
    let today = date(2025, 1, 31);
    assert_eq!(month_key_on(today, 0), "2025-01");
    assert_eq!(month_key_on(today, 1), "2024-12");
    assert_eq!(month_key_on(today, 13), "2023-12");
}

#[test]
fn month_dates_cover_whole_month() {
    let today = date(2024, 3, 31);

    let february = month_dates_on(today, 1);
    assert_eq!(february.len(), 29);
    assert_eq!(february.first().map(String::as_str), Some("2024-02-01"));
    assert_eq!(february.last().map(String::as_str), Some("2024-02-29"));

    assert_eq!(month_dates_on(today, 0).len(), 31);
}

#[test]
fn year_window_lists_twelve_month_keys() {
    let months = year_window_on(date(2024, 7, 4), 1);
    assert_eq!(months.len(), 12);
    assert_eq!(months[0], "2023-01");
    assert_eq!(months[11], "2023-12");
}

#[test]
fn fill_window_keeps_length_and_inserts_placeholders() {
    let recorded = Entry::new("2024-02-27", ["🔥"], Some(10), None, 7);
    let dates = week_dates_on(date(2024, 3, 6), 1);

    let filled = fill_window(&[recorded.clone()], &dates);
    assert_eq!(filled.len(), 7);
    assert_eq!(filled[1], recorded);
    for (index, slot) in filled.iter().enumerate() {
        assert_eq!(slot.date(), dates[index]);
        if index != 1 {
            assert!(slot.emojis().is_empty());
            assert_eq!(slot.updated_at(), 0);
        }
    }
}

#[test]
fn huge_offsets_saturate_at_year_one() {
    let today = date(2024, 3, 6);

    let week = week_dates_on(today, u32::MAX);
    assert_eq!(week.len(), 7);
    assert_eq!(week[0], "0001-01-01");
    assert_eq!(week[6], "0001-01-07");

    assert_eq!(month_key_on(today, u32::MAX), "0001-01");
    assert_eq!(month_dates_on(today, u32::MAX).len(), 31);

    let months = year_window_on(today, u32::MAX);
    assert_eq!(months[0], "0001-01");
    assert_eq!(months[11], "0001-12");
}
