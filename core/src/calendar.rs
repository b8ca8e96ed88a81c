//! Timestamp sampling and calendar arithmetic.

use crate::{
    error::{GenError, GenResult},
    rng::GenRng,
};
use chrono::{Duration, Months, NaiveDate, NaiveDateTime};

/// Text encoding for every timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SECONDS_PER_DAY: i64 = 86_400;

/// Midnight on the given date. Only for dates known to be valid.
pub fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid calendar date")
}

/// Uniform timestamp in `[start, end]`: a whole-day offset drawn over the
/// window's day span, then a second-of-day drawn over that day. The last
/// day is cut short when the window ends before it does.
pub fn random_timestamp(rng: &mut GenRng, start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
    if end <= start {
        return start;
    }
    let span_days = (end - start).num_days();
    let day = rng.range_inclusive(0, span_days);
    let day_start = start + Duration::days(day);
    let last_second = (end - day_start).num_seconds().min(SECONDS_PER_DAY - 1);
    let second = rng.range_inclusive(0, last_second);
    day_start + Duration::seconds(second)
}

pub fn add_days(at: NaiveDateTime, days: u32) -> GenResult<NaiveDateTime> {
    at.checked_add_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| GenError::DateOutOfRange(format!("{at} + {days} days")))
}

/// Last moment covered by a plan: `months` calendar months after
/// activation, minus one day. Month addition clamps to the end of short
/// months, so Jan 31 + 1 month is Feb 28 (or 29).
pub fn expiration(activation: NaiveDateTime, months: u32) -> GenResult<NaiveDateTime> {
    activation
        .checked_add_months(Months::new(months))
        .and_then(|d| d.checked_sub_signed(Duration::days(1)))
        .ok_or_else(|| GenError::DateOutOfRange(format!("{activation} + {months} months")))
}

pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, ss)
            .unwrap()
    }

    #[test]
    fn expiration_clamps_month_end() {
        let activation = at(2024, 1, 31, 10, 0, 0);
        // Feb 29 (leap year) minus one day.
        assert_eq!(expiration(activation, 1).unwrap(), at(2024, 2, 28, 10, 0, 0));
        let activation = at(2023, 1, 31, 10, 0, 0);
        assert_eq!(expiration(activation, 1).unwrap(), at(2023, 2, 27, 10, 0, 0));
    }

    #[test]
    fn expiration_spans_year_boundary() {
        let activation = at(2024, 11, 15, 8, 30, 0);
        assert_eq!(expiration(activation, 3).unwrap(), at(2025, 2, 14, 8, 30, 0));
        assert_eq!(expiration(activation, 12).unwrap(), at(2025, 11, 14, 8, 30, 0));
    }

    #[test]
    fn random_timestamps_stay_inside_window() {
        let start = midnight(2021, 1, 1);
        let end = at(2025, 8, 31, 23, 59, 59);
        let mut rng = GenRng::new(99);
        for _ in 0..5_000 {
            let ts = random_timestamp(&mut rng, start, end);
            assert!(ts >= start && ts <= end, "{ts} outside window");
        }
    }

    #[test]
    fn single_day_window_varies_only_time() {
        let start = midnight(2022, 6, 1);
        let end = at(2022, 6, 1, 23, 59, 59);
        let mut rng = GenRng::new(4);
        for _ in 0..100 {
            assert_eq!(random_timestamp(&mut rng, start, end).date(), start.date());
        }
    }

    #[test]
    fn partial_last_day_never_overruns_window() {
        let start = midnight(2022, 6, 1);
        let end = at(2022, 6, 2, 12, 0, 0);
        let mut rng = GenRng::new(13);
        let mut saw_second_day = false;
        for _ in 0..2_000 {
            let ts = random_timestamp(&mut rng, start, end);
            assert!(ts >= start && ts <= end, "{ts} outside window");
            saw_second_day |= ts.date() == end.date();
        }
        assert!(saw_second_day);
    }

    #[test]
    fn point_window_returns_its_instant() {
        let start = at(2023, 3, 3, 9, 15, 0);
        let mut rng = GenRng::new(6);
        for _ in 0..50 {
            assert_eq!(random_timestamp(&mut rng, start, start), start);
        }
    }

    #[test]
    fn timestamps_format_with_space_separator() {
        assert_eq!(format_timestamp(&at(2021, 3, 4, 5, 6, 7)), "2021-03-04 05:06:07");
    }
}
