//! Clock-time and civil-calendar helpers for the billing engine.
//! All times-of-day travel as `HH:mm` strings and are converted to minutes
//! since midnight for arithmetic; all dates are naive civil dates in the
//! school's local calendar.

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::helper_model::EscolarError;

lazy_static::lazy_static! {
    static ref TIME_REGEX: Regex =
        Regex::new(r"^([0-1][0-9]|2[0-3]):[0-5][0-9]$").expect("Invalid time regex");
}

pub fn is_valid_time_format(time: &str) -> bool {
    TIME_REGEX.is_match(time)
}

/// Parse `HH:mm` into minutes since midnight.
pub fn time_to_minutes(time: &str) -> Result<i32, EscolarError> {
    if !is_valid_time_format(time) {
        return Err(EscolarError::TimeFormat(time.to_string()));
    }
    let (hour, minute) = time.split_once(':').ok_or_else(|| EscolarError::TimeFormat(time.to_string()))?;
    let hour: i32 = hour.parse().map_err(|_| EscolarError::TimeFormat(time.to_string()))?;
    let minute: i32 = minute.parse().map_err(|_| EscolarError::TimeFormat(time.to_string()))?;
    Ok(hour * 60 + minute)
}

/// Inverse of `time_to_minutes`, zero-padded.
#[allow(dead_code)]
pub fn minutes_to_time(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Contract schedules are sold in half-hour blocks, so contracted times
/// must sit on a :00 or :30 mark. Real arrival times are not constrained.
pub fn is_half_hour_mark(time: &str) -> bool {
    match time_to_minutes(time) {
        Ok(minutes) => minutes % 30 == 0,
        Err(_) => false,
    }
}

/// Exit must be strictly after entry.
pub fn validate_time_range(entry_time: &str, exit_time: &str) -> Result<bool, EscolarError> {
    Ok(time_to_minutes(exit_time)? > time_to_minutes(entry_time)?)
}

/// Monday-first weekday index (Mon=0 .. Fri=4). Saturday and Sunday are
/// not school days and are rejected.
pub fn weekday_index(date: NaiveDate) -> Result<i32, EscolarError> {
    let index = date.weekday().num_days_from_monday() as i32;
    if index > 4 {
        return Err(EscolarError::InvalidWeekday);
    }
    Ok(index)
}

/// First and last civil day of a month.
pub fn month_bounds(month: u32, year: i32) -> Result<(NaiveDate, NaiveDate), EscolarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(EscolarError::InvalidMonth)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(EscolarError::InvalidMonth)?;
    Ok((first, next_first.pred_opt().ok_or(EscolarError::InvalidMonth)?))
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_times() {
        assert_eq!(time_to_minutes("08:00").unwrap(), 480);
        assert_eq!(time_to_minutes("00:00").unwrap(), 0);
        assert_eq!(time_to_minutes("23:59").unwrap(), 1439);
        assert_eq!(minutes_to_time(480), "08:00");
        assert_eq!(minutes_to_time(1439), "23:59");
        assert_eq!(minutes_to_time(5), "00:05");
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["24:00", "8:00", "12:60", "12h30", "", "12:3"] {
            assert_eq!(
                time_to_minutes(bad),
                Err(EscolarError::TimeFormat(bad.to_string()))
            );
        }
    }

    #[test]
    fn half_hour_marks() {
        assert!(is_half_hour_mark("08:00"));
        assert!(is_half_hour_mark("08:30"));
        assert!(!is_half_hour_mark("08:15"));
        assert!(!is_half_hour_mark("25:00"));
    }

    #[test]
    fn time_range_requires_exit_after_entry() {
        assert!(validate_time_range("08:00", "12:00").unwrap());
        assert!(!validate_time_range("12:00", "08:00").unwrap());
        assert!(!validate_time_range("08:00", "08:00").unwrap());
        assert!(validate_time_range("08:00", "bogus").is_err());
    }

    #[test]
    fn weekday_index_is_monday_first() {
        // 2025-06-02 is a Monday
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(weekday_index(monday).unwrap(), 0);
        let friday = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
        assert_eq!(weekday_index(friday).unwrap(), 4);
    }

    #[test]
    fn weekends_are_rejected() {
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        assert_eq!(weekday_index(saturday), Err(EscolarError::InvalidWeekday));
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        assert_eq!(weekday_index(sunday), Err(EscolarError::InvalidWeekday));
    }

    #[test]
    fn month_bounds_cover_leap_years() {
        let (first, last) = month_bounds(2, 2024).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        let (first, last) = month_bounds(12, 2025).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        assert_eq!(month_bounds(13, 2025), Err(EscolarError::InvalidMonth));
        assert_eq!(month_bounds(0, 2025), Err(EscolarError::InvalidMonth));
    }
}
