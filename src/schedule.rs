//! Scheduling window checks for announcements.
//!
//! Dates are ISO 8601:
//!
//! - a calendar date (`2025-06-01`), a year-month (`2025-06`) or a year
//!   (`2025`), all starting at UTC midnight of their first day
//! - a date-time with `Z` or a numeric offset, to the minute or second,
//!   colon optional (`2025-06-01T09:00Z`, `2025-06-01T09:00:00.000+0200`)
//! - a date-time without an offset, which is read as UTC
//!
//! All comparisons happen in UTC so every visitor sees the same cutover
//! regardless of their time zone.
//!
//! The end date is inclusive through the whole UTC day it falls on:
//! `endDate = "2025-06-30"` keeps an announcement up until
//! `2025-06-30T23:59:59.999Z`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO 8601 date or date-time into a UTC instant.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let zoned = match value.strip_suffix(|c: char| c == 'Z' || c == 'z') {
        Some(local) => format!("{local}+00:00"),
        None => value.to_string(),
    };
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    parse_calendar_date(value).map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`; missing parts default to the first.
fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
    match value.split('-').collect::<Vec<_>>()[..] {
        [year, month, day] if digits(year, 4) && digits(month, 2) && digits(day, 2) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
        }
        [year, month] if digits(year, 4) && digits(month, 2) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        [year] if digits(year, 4) => NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1),
        _ => None,
    }
}

/// Last millisecond of the UTC day `instant` falls on.
pub fn end_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .map(|t| instant.date_naive().and_time(t).and_utc())
        .unwrap_or(instant)
}

/// Whether `now` falls inside the optional `[start, endOfDay(end)]` window.
///
/// Dates are expected to have passed validation. One that still fails to
/// parse makes the announcement inactive and logs a warning; it never
/// aborts resolution of other announcements.
pub fn is_within_date_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
    now: DateTime<Utc>,
) -> bool {
    if let Some(raw) = start_date {
        let Some(start) = parse_date(raw) else {
            tracing::warn!(start_date = raw, "invalid startDate, treating announcement as inactive");
            return false;
        };
        if now < start {
            return false;
        }
    }

    if let Some(raw) = end_date {
        let Some(end) = parse_date(raw) else {
            tracing::warn!(end_date = raw, "invalid endDate, treating announcement as inactive");
            return false;
        };
        if now > end_of_day(end) {
            return false;
        }
    }

    true
}
