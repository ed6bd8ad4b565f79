//! Date windows over the entry timeline.
//!
//! # Responsibility
//! - Format and shift ISO calendar dates across month/year/leap boundaries.
//! - Decide editability (today or yesterday only).
//! - Build fixed-length week/month/year windows with placeholder gap-filling.
//!
//! # Invariants
//! - Dates are exchanged as `YYYY-MM-DD` strings, months as `YYYY-MM`.
//! - Week windows start on Monday and always hold 7 dates.
//! - `fill_window` output length always equals the requested date count.
//! - Offsets reaching past year 1 saturate at 0001-01-01 (a Monday), so
//!   windows stay full-length and keep four-digit years.
//!
//! Every operation that reads the clock has an `*_on(today, ..)` twin that
//! takes the current date explicitly.

use crate::model::entry::Entry;
use chrono::{Datelike, Days, Local, Months, NaiveDate, TimeDelta};
use std::collections::HashMap;

/// `strftime` pattern for entry date keys.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// `strftime` pattern for month keys.
pub const MONTH_KEY_FORMAT: &str = "%Y-%m";

const DAYS_PER_WEEK: u64 = 7;
const RECENT_WINDOW: usize = 7;

/// Returns the current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Returns the current local calendar date as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    format_date(today())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), ISO_DATE_FORMAT).ok()
}

/// Returns the date `delta` days away from `date`.
///
/// Returns `None` when `date` does not parse or the result leaves the
/// supported calendar range.
pub fn add_days(date: &str, delta: i64) -> Option<String> {
    let start = parse_date(date)?;
    let shift = TimeDelta::try_days(delta)?;
    start.checked_add_signed(shift).map(format_date)
}

/// Returns whether `date` is today or yesterday in local time.
pub fn can_edit(date: &str) -> bool {
    can_edit_on(today(), date)
}

pub fn can_edit_on(today: NaiveDate, date: &str) -> bool {
    match parse_date(date) {
        Some(day) => day == today || Some(day) == today.pred_opt(),
        None => false,
    }
}

/// Returns the 7 most recently dated entries, oldest first.
///
/// This is "last 7 recorded", not "last 7 calendar days"; use
/// [`week_dates`] with [`fill_window`] for calendar-anchored weeks.
pub fn last7(entries: &[Entry]) -> Vec<Entry> {
    let mut recent: Vec<&Entry> = entries.iter().collect();
    recent.sort_by(|left, right| right.date().cmp(left.date()));
    recent.truncate(RECENT_WINDOW);
    recent.into_iter().rev().cloned().collect()
}

/// Monday-to-Sunday dates of the week `offset` weeks before this one.
///
/// Offsets past year 1 yield the first week of 0001.
pub fn week_dates(offset: u32) -> Vec<String> {
    week_dates_on(today(), offset)
}

pub fn week_dates_on(today: NaiveDate, offset: u32) -> Vec<String> {
    let since_monday = u64::from(today.weekday().num_days_from_monday());
    let back = since_monday + DAYS_PER_WEEK * u64::from(offset);
    let monday = today
        .checked_sub_days(Days::new(back))
        .map_or(earliest_day(), |day| day.max(earliest_day()));

    monday
        .iter_days()
        .take(DAYS_PER_WEEK as usize)
        .map(format_date)
        .collect()
}

/// `YYYY-MM` key of the month `offset` months before the current one.
pub fn month_key(offset: u32) -> String {
    month_key_on(today(), offset)
}

pub fn month_key_on(today: NaiveDate, offset: u32) -> String {
    month_start_on(today, offset)
        .format(MONTH_KEY_FORMAT)
        .to_string()
}

/// Every date of the month `offset` months back, in order.
pub fn month_dates(offset: u32) -> Vec<String> {
    month_dates_on(today(), offset)
}

pub fn month_dates_on(today: NaiveDate, offset: u32) -> Vec<String> {
    let first = month_start_on(today, offset);
    first
        .iter_days()
        .take_while(|day| day.month() == first.month() && day.year() == first.year())
        .map(format_date)
        .collect()
}

/// The 12 `YYYY-MM` keys of the calendar year `offset` years back,
/// never earlier than year 1.
pub fn year_window(offset: u32) -> Vec<String> {
    year_window_on(today(), offset)
}

pub fn year_window_on(today: NaiveDate, offset: u32) -> Vec<String> {
    let year = (i64::from(today.year()) - i64::from(offset)).max(1);
    (1..=12)
        .map(|month| format!("{year:04}-{month:02}"))
        .collect()
}

/// Looks up each date, substituting an empty placeholder where nothing
/// was recorded.
pub fn fill_window(entries: &[Entry], dates: &[String]) -> Vec<Entry> {
    let by_date: HashMap<&str, &Entry> = entries
        .iter()
        .map(|entry| (entry.date(), entry))
        .collect();

    dates
        .iter()
        .map(|date| match by_date.get(date.as_str()) {
            Some(entry) => (*entry).clone(),
            None => Entry::placeholder(date.as_str()),
        })
        .collect()
}

fn month_start_on(today: NaiveDate, offset: u32) -> NaiveDate {
    // Day 1 exists in every month, so with_day(1) cannot fail here.
    let first = today.with_day(1).unwrap_or(today);
    first
        .checked_sub_months(Months::new(offset))
        .map_or(earliest_day(), |day| day.max(earliest_day()))
}

/// Lower bound for every window start.
fn earliest_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::{month_start_on, parse_date};
    use chrono::NaiveDate;

    #[test]
    fn parse_date_trims_and_rejects_garbage() {
        assert_eq!(
            parse_date(" 2024-05-01 "),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
        assert!(parse_date("2024-13-01").is_none());
        assert!(parse_date("yesterday").is_none());
    }

    #[test]
    fn month_start_crosses_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 17).unwrap();
        assert_eq!(
            month_start_on(today, 3),
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
        );
    }
}
