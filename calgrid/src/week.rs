//! Week-aligned date range arithmetic.
//!
//! Every computation here is parameterized by the week start day, so a grid
//! can follow any locale's week convention without the state machine knowing
//! about locales at all.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

/// Number of rows a canonical month window always spans.
pub const CANONICAL_ROWS: i64 = 6;

/// Returns the first day of the week containing `date`.
pub fn week_start_of(week_start: Weekday, date: NaiveDate) -> NaiveDate {
    date.week(week_start).first_day()
}

/// Returns the last day of the week containing `date`.
pub fn week_end_of(week_start: Weekday, date: NaiveDate) -> NaiveDate {
    date.week(week_start).last_day()
}

/// Counts calendar-week boundaries between two dates, inclusive.
///
/// Two dates in the same week yield 1. The count is signed: if `end` falls in
/// an earlier week than `start` the result is zero or negative.
pub fn rows_between(week_start: Weekday, start: NaiveDate, end: NaiveDate) -> i64 {
    let start_week = week_start_of(week_start, start);
    let end_week = week_start_of(week_start, end);
    end_week.signed_duration_since(start_week).num_days() / 7 + 1
}

/// Number of calendar weeks the month of `date` spans (4, 5 or 6).
pub fn rows_in_month(week_start: Weekday, date: NaiveDate) -> i64 {
    rows_between(week_start, month_start(date), month_end(date))
}

/// Start of the week containing the first day of the month.
pub fn canonical_start(week_start: Weekday, date: NaiveDate) -> NaiveDate {
    week_start_of(week_start, month_start(date))
}

/// End of the canonical 6-row window covering the month of `date`.
///
/// Short months are padded with trailing weeks so the window is always
/// exactly [`CANONICAL_ROWS`] rows tall, which keeps the rendered grid height
/// constant regardless of month length.
pub fn canonical_end(week_start: Weekday, date: NaiveDate) -> NaiveDate {
    let padding_weeks = CANONICAL_ROWS - rows_in_month(week_start, date);
    let padded = month_end(date)
        .checked_add_days(Days::new(padding_weeks as u64 * 7))
        .expect("date exceeds the supported calendar range");
    week_end_of(week_start, padded)
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("the first of a month always exists")
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .expect("date exceeds the supported calendar range")
}

/// Shifts `date` by whole months, clamping the day of month where needed.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.expect("date exceeds the supported calendar range")
}

/// Signed count of calendar-month boundaries from `b` to `a`.
pub fn months_between(a: NaiveDate, b: NaiveDate) -> i32 {
    (a.year() - b.year()) * 12 + (a.month() as i32 - b.month() as i32)
}

/// Whether two dates fall in the same calendar month.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
