// Date utility functions
// Epoch day indices and month grid arithmetic for wall-clock dates

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Default epoch for day indices (day index 0).
pub fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Number of whole days between `epoch` and `date` (negative before the epoch).
pub fn day_index_for(date: NaiveDate, epoch: NaiveDate) -> i64 {
    (date - epoch).num_days()
}

/// Inverse of [`day_index_for`]. Returns `None` outside chrono's date range.
pub fn date_for_day_index(day_index: i64, epoch: NaiveDate) -> Option<NaiveDate> {
    let offset = Duration::try_days(day_index)?;
    epoch.checked_add_signed(offset)
}

/// Minutes elapsed since `epoch` midnight.
pub fn minute_index(datetime: NaiveDateTime, epoch: NaiveDate) -> i64 {
    let time = datetime.time();
    day_index_for(datetime.date(), epoch) * MINUTES_PER_DAY
        + i64::from(time.hour()) * 60
        + i64::from(time.minute())
}

/// Minutes since `epoch` midnight, rounded up when `datetime` is mid-minute.
pub fn minute_index_ceil(datetime: NaiveDateTime, epoch: NaiveDate) -> i64 {
    let time = datetime.time();
    let partial = time.second() > 0 || time.nanosecond() > 0;
    minute_index(datetime, epoch) + i64::from(partial)
}

/// Fractional hours elapsed since `epoch` midnight.
pub fn hour_offset(datetime: NaiveDateTime, epoch: NaiveDate) -> f64 {
    let time = datetime.time();
    day_index_for(datetime.date(), epoch) as f64 * 24.0
        + f64::from(time.hour())
        + f64::from(time.minute()) / 60.0
        + f64::from(time.second()) / 3600.0
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - i64::from(first_day_of_week % 7) + 7) % 7;
    date - Duration::days(offset)
}

/// Number of days in the given month (`month` is 1-based).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}

/// Shift a (year, month) pair by `offset` months.
pub fn add_months(year: i32, month: u32, offset: i64) -> (i32, u32) {
    let zero_based = i64::from(year) * 12 + i64::from(month.clamp(1, 12)) - 1 + offset;
    let year = zero_based.div_euclid(12) as i32;
    let month = zero_based.rem_euclid(12) as u32 + 1;
    (year, month)
}

/// Whole months from `(from_year, from_month)` to `(to_year, to_month)`.
pub fn months_between(from_year: i32, from_month: u32, to_year: i32, to_month: u32) -> i64 {
    (i64::from(to_year) - i64::from(from_year)) * 12 + i64::from(to_month) - i64::from(from_month)
}

/// First date shown in a month grid: the week start on or before the 1st.
pub fn month_grid_start(year: i32, month: u32, first_day_of_week: u8) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(get_week_start(first, first_day_of_week))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_index_round_trip() {
        let epoch = default_epoch();
        for day in [-800_000, -1, 0, 1, 19_000, 700_000] {
            let d = date_for_day_index(day, epoch).unwrap();
            assert_eq!(day_index_for(d, epoch), day);
        }
    }

    #[test]
    fn test_day_index_out_of_range() {
        assert!(date_for_day_index(i64::MAX, default_epoch()).is_none());
    }

    #[test]
    fn test_minute_index_counts_from_epoch_midnight() {
        let epoch = date(2024, 1, 1);
        let dt = date(2024, 1, 2).and_hms_opt(1, 30, 0).unwrap();
        assert_eq!(minute_index(dt, epoch), 1440 + 90);
        assert_eq!(hour_offset(dt, epoch), 25.5);
    }

    #[test]
    fn test_minute_index_ceil_rounds_partial_minutes_up() {
        let epoch = date(2024, 1, 1);
        let whole = date(2024, 1, 1).and_hms_opt(1, 30, 0).unwrap();
        let partial = date(2024, 1, 1).and_hms_opt(1, 30, 1).unwrap();
        assert_eq!(minute_index_ceil(whole, epoch), 90);
        assert_eq!(minute_index_ceil(partial, epoch), 91);
        assert_eq!(minute_index(partial, epoch), 90);
    }

    #[test]
    fn test_get_week_start_sunday() {
        // Wednesday, Dec 4, 2024
        assert_eq!(get_week_start(date(2024, 12, 4), 0), date(2024, 12, 1));
    }

    #[test]
    fn test_get_week_start_monday() {
        assert_eq!(get_week_start(date(2024, 12, 4), 1), date(2024, 12, 2));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 4), 30);
    }

    #[test]
    fn test_add_months_wraps_years() {
        assert_eq!(add_months(2025, 11, 3), (2026, 2));
        assert_eq!(add_months(2025, 1, -1), (2024, 12));
        assert_eq!(add_months(2025, 6, -18), (2023, 12));
        assert_eq!(months_between(2023, 12, 2025, 6), 18);
    }

    #[test]
    fn test_month_grid_start() {
        // March 1, 2025 is a Saturday
        assert_eq!(month_grid_start(2025, 3, 0), Some(date(2025, 2, 23)));
        assert_eq!(month_grid_start(2025, 3, 1), Some(date(2025, 2, 24)));
    }
}
