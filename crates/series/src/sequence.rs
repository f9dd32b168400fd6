//! Consecutive calendar-day sequences.

use chrono::NaiveDate;

/// Produces `n_days` consecutive dates starting at `start`.
///
/// Month, year and leap-day boundaries follow the proleptic Gregorian
/// calendar. The sequence stops early only at the end of the representable
/// date range.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use vaxcast_series::daily_sequence;
///
/// let start = NaiveDate::from_ymd_opt(2021, 12, 30).unwrap();
/// let dates = daily_sequence(start, 4);
/// assert_eq!(dates[3], NaiveDate::from_ymd_opt(2022, 1, 2).unwrap());
/// ```
pub fn daily_sequence(start: NaiveDate, n_days: usize) -> Vec<NaiveDate> {
    start.iter_days().take(n_days).collect()
}
