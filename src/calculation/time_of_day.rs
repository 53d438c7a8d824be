//! Parsing of the portal's date and time-of-day strings, and overnight spans.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::{EngineError, EngineResult};

const SECONDS_PER_DAY: i64 = 24 * 3600;

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Parses a time-of-day in `HH:MM` or `HH:MM:SS` form.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimeFormat`] naming `field` when the value
/// is not a valid time of day.
///
/// # Examples
///
/// ```
/// use sla_engine::calculation::parse_time_of_day;
/// use chrono::NaiveTime;
///
/// let time = parse_time_of_day("work_end", "17:30").unwrap();
/// assert_eq!(time, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
///
/// assert!(parse_time_of_day("work_end", "25:00").is_err());
/// ```
pub fn parse_time_of_day(field: &str, value: &str) -> EngineResult<NaiveTime> {
    let trimmed = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| EngineError::InvalidTimeFormat {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDateFormat`] naming `field`.
pub fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        EngineError::InvalidDateFormat {
            field: field.to_string(),
            value: value.to_string(),
        }
    })
}

/// Seconds from `start` to `end`, rolling `end` into the next day when it is
/// not later than `start`.
///
/// ```
/// use sla_engine::calculation::overnight_span_seconds;
/// use chrono::NaiveTime;
///
/// let start = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(0, 30, 0).unwrap();
/// assert_eq!(overnight_span_seconds(start, end), 3600);
/// ```
pub fn overnight_span_seconds(start: NaiveTime, end: NaiveTime) -> i64 {
    let start = i64::from(start.num_seconds_from_midnight());
    let end = i64::from(end.num_seconds_from_midnight());

    if end <= start {
        end + SECONDS_PER_DAY - start
    } else {
        end - start
    }
}
