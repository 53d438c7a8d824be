//! Attendance record model and its derived duration.
//!
//! An [`AttendanceRecord`] is read-only input handed over by the caller;
//! a [`DerivedDuration`] is computed fresh for each request and never stored
//! by this crate.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single attendance session as stored by the portal.
///
/// Precomputed minute totals win over clock timestamps: `total_minutes_final`
/// first, then `total_minutes_raw`, then `time_out - time_in`.
///
/// # Example
///
/// ```
/// use sla_engine::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let record = AttendanceRecord {
///     id: Some("att_001".to_string()),
///     date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     time_in: NaiveDateTime::parse_from_str("2024-01-15 08:00:00", "%Y-%m-%d %H:%M:%S").ok(),
///     time_out: None,
///     total_minutes_raw: None,
///     total_minutes_final: None,
///     is_field_engineer: false,
/// };
/// assert!(record.time_out.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Identifier of the stored row, carried into reports.
    #[serde(default)]
    pub id: Option<String>,
    /// The calendar date the shift occurred.
    pub date: NaiveDate,
    /// When the employee clocked in.
    #[serde(default)]
    pub time_in: Option<NaiveDateTime>,
    /// When the employee clocked out; absent while the session is open.
    #[serde(default)]
    pub time_out: Option<NaiveDateTime>,
    /// Precomputed duration in minutes as captured by the clock.
    #[serde(default)]
    pub total_minutes_raw: Option<i64>,
    /// Precomputed duration in minutes after manual correction.
    #[serde(default)]
    pub total_minutes_final: Option<i64>,
    /// Whether the employee holds a Field Engineer position.
    #[serde(default)]
    pub is_field_engineer: bool,
}

/// Which input produced the raw hours of a [`DerivedDuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationSource {
    /// `total_minutes_final` was used.
    FinalMinutes,
    /// `total_minutes_raw` was used.
    RawMinutes,
    /// `time_out - time_in` was used.
    Clocked,
    /// `now - time_in` for a session that is still open.
    Active,
    /// No usable input; all figures are zero.
    Unavailable,
}

/// Normalized hour figures for one attendance session.
///
/// All values are rounded to two decimal places and never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedDuration {
    /// Elapsed hours before any deduction.
    pub raw_hours: Decimal,
    /// Lunch deduction applied (0 or 1 hour).
    pub lunch_deduction_hours: Decimal,
    /// `raw_hours - lunch_deduction_hours`, floored at zero.
    pub effective_hours: Decimal,
    /// Hours up to the standard workday.
    pub regular_hours: Decimal,
    /// Hours beyond the standard workday.
    pub overtime_hours: Decimal,
    /// Which input produced `raw_hours`.
    pub source: DurationSource,
    /// True while the session is still open.
    pub is_active: bool,
}

impl DerivedDuration {
    /// A duration with every figure at zero.
    pub fn zero(source: DurationSource) -> Self {
        Self {
            raw_hours: Decimal::ZERO,
            lunch_deduction_hours: Decimal::ZERO,
            effective_hours: Decimal::ZERO,
            regular_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            source,
            is_active: false,
        }
    }
}
