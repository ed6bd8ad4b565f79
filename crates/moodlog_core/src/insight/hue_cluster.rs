//! Monthly color families from circular hue statistics.
//!
//! # Responsibility
//! - Bin a month's hues into fixed-width angular buckets.
//! - Collapse the busiest buckets to one representative hue each.
//!
//! # Invariants
//! - Hue is cyclic: 0 and 359 are neighbours, so averaging is vector-based.
//! - Empty or hue-less months yield [`FALLBACK_PALETTE`], never an error.
//! - Output is ordered by bucket population, ties by lower bucket index.

use crate::model::entry::Entry;

/// Default palette returned when a month has no hued entries.
pub const FALLBACK_PALETTE: [f64; 3] = [220.0, 300.0, 40.0];

const FAMILY_BUCKET_DEGREES: u16 = 30;
const MAX_FAMILIES: usize = 3;
const STOP_BUCKET_DEGREES: u16 = 15;
const MAX_STOPS: usize = 5;

/// One color family found in a month.
#[derive(Debug, Clone, PartialEq)]
pub struct HueFamily {
    /// Circular mean of the member hues, in `[0, 360)`.
    pub hue: f64,
    /// Number of entries in the family.
    pub count: usize,
}

/// Up to 3 representative hues for `year_month` (`YYYY-MM`).
pub fn monthly_top3(entries: &[Entry], year_month: &str) -> Vec<f64> {
    let families = monthly_families(entries, year_month);
    if families.is_empty() {
        return FALLBACK_PALETTE.to_vec();
    }
    families.into_iter().map(|family| family.hue).collect()
}

/// Color families for `year_month`, busiest first. Empty when the month has
/// no hued entries.
pub fn monthly_families(entries: &[Entry], year_month: &str) -> Vec<HueFamily> {
    let hues = month_hues(entries, year_month);
    ranked_buckets(&hues, FAMILY_BUCKET_DEGREES)
        .into_iter()
        .take(MAX_FAMILIES)
        .filter_map(|bucket| {
            circular_mean(&bucket.hues).map(|hue| HueFamily {
                hue,
                count: bucket.hues.len(),
            })
        })
        .collect()
}

/// Up to 5 raw 15-degree bucket midpoints for `year_month`, busiest first.
///
/// Coarser sibling of [`monthly_top3`]; no averaging inside buckets.
pub fn monthly_stops(entries: &[Entry], year_month: &str) -> Vec<f64> {
    let hues = month_hues(entries, year_month);
    if hues.is_empty() {
        return FALLBACK_PALETTE.to_vec();
    }
    let half_width = f64::from(STOP_BUCKET_DEGREES) / 2.0;
    ranked_buckets(&hues, STOP_BUCKET_DEGREES)
        .into_iter()
        .take(MAX_STOPS)
        .map(|bucket| f64::from(bucket.index * STOP_BUCKET_DEGREES) + half_width)
        .collect()
}

/// Circular mean of hue angles in degrees, normalized to `[0, 360)`.
///
/// A single hue is returned unchanged; an empty slice has no mean.
pub fn circular_mean(hues: &[u16]) -> Option<f64> {
    match hues {
        [] => None,
        [only] => Some(f64::from(*only)),
        _ => {
            let (sin_sum, cos_sum) = hues.iter().fold((0.0_f64, 0.0_f64), |(sin, cos), hue| {
                let radians = f64::from(*hue).to_radians();
                (sin + radians.sin(), cos + radians.cos())
            });
            let degrees = sin_sum.atan2(cos_sum).to_degrees().rem_euclid(360.0);
            // rem_euclid can round a tiny negative angle up to exactly 360.0.
            Some(if degrees >= 360.0 { 0.0 } else { degrees })
        }
    }
}

struct HueBucket {
    index: u16,
    hues: Vec<u16>,
}

fn month_hues(entries: &[Entry], year_month: &str) -> Vec<u16> {
    let prefix = format!("{}-", year_month.trim());
    entries
        .iter()
        .filter(|entry| entry.date().starts_with(prefix.as_str()))
        .filter_map(Entry::hue)
        .collect()
}

/// Non-empty buckets sorted by population descending. The sort is stable,
/// so equal counts keep ascending bucket order.
fn ranked_buckets(hues: &[u16], width: u16) -> Vec<HueBucket> {
    let bucket_count = 360 / width;
    let mut buckets: Vec<HueBucket> = (0..bucket_count)
        .map(|index| HueBucket {
            index,
            hues: Vec::new(),
        })
        .collect();

    for hue in hues {
        let index = (hue / width) % bucket_count;
        buckets[usize::from(index)].hues.push(*hue);
    }

    buckets.retain(|bucket| !bucket.hues.is_empty());
    buckets.sort_by(|left, right| right.hues.len().cmp(&left.hues.len()));
    buckets
}

#[cfg(test)]
mod tests {
    use super::{circular_mean, ranked_buckets};

    #[test]
    fn circular_mean_wraps_across_zero() {
        let mean = circular_mean(&[350, 10]).unwrap();
        assert!(mean < 0.001 || mean > 359.999, "unexpected mean {mean}");
    }

    #[test]
    fn circular_mean_single_hue_is_exact() {
        assert_eq!(circular_mean(&[123]), Some(123.0));
        assert_eq!(circular_mean(&[]), None);
    }

    #[test]
    fn ranked_buckets_break_ties_by_index() {
        let buckets = ranked_buckets(&[200, 10, 100, 205], 30);
        let order: Vec<u16> = buckets.iter().map(|bucket| bucket.index).collect();
        assert_eq!(order, vec![6, 0, 3]);
    }
}
