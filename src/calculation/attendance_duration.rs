//! Attendance duration calculation.
//!
//! Turns an [`AttendanceRecord`] into a [`DerivedDuration`]: raw hours from
//! the best available input, the Field Engineer lunch deduction, and the
//! regular/overtime split at the standard workday.
//!
//! The calculation never fails. Missing or inconsistent inputs degrade to
//! zero hours and are flagged with an [`AuditWarning`].

use chrono::{Days, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::WorkdayPolicy;
use crate::models::{AttendanceRecord, AuditStep, AuditWarning, DerivedDuration, DurationSource};

use super::daily_overtime::detect_daily_overtime;
use super::lunch_deduction::apply_lunch_deduction;
use super::rounding::{hours_from_minutes, hours_from_seconds};

/// A derived duration together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCalculation {
    /// The computed figures.
    pub duration: DerivedDuration,
    /// Audit steps in application order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings about incomplete or inconsistent input.
    pub warnings: Vec<AuditWarning>,
}

/// Computes the derived duration of one attendance session.
///
/// `now` is only read for an open session; pass a single captured clock
/// value when computing many records so they share one snapshot.
///
/// # Examples
///
/// ```
/// use sla_engine::calculation::compute_attendance_duration;
/// use sla_engine::config::WorkdayPolicy;
/// use sla_engine::models::AttendanceRecord;
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let record = AttendanceRecord {
///     id: None,
///     date,
///     time_in: date.and_hms_opt(8, 0, 0),
///     time_out: date.and_hms_opt(18, 0, 0),
///     total_minutes_raw: None,
///     total_minutes_final: None,
///     is_field_engineer: true,
/// };
/// let now = date.and_hms_opt(20, 0, 0).unwrap();
///
/// let duration = compute_attendance_duration(&record, now, &WorkdayPolicy::default());
/// assert_eq!(duration.raw_hours, Decimal::from(10));
/// assert_eq!(duration.effective_hours, Decimal::from(9));
/// assert_eq!(duration.overtime_hours, Decimal::from(1));
/// ```
pub fn compute_attendance_duration(
    record: &AttendanceRecord,
    now: NaiveDateTime,
    policy: &WorkdayPolicy,
) -> DerivedDuration {
    calculate_attendance(record, now, policy, 1).duration
}

/// Computes the derived duration of one attendance session with its audit
/// steps, numbering steps from `start_step_number`.
pub fn calculate_attendance(
    record: &AttendanceRecord,
    now: NaiveDateTime,
    policy: &WorkdayPolicy,
    start_step_number: u32,
) -> AttendanceCalculation {
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number = start_step_number;

    let (source, raw_hours) = resolve_raw_hours(record, now, &mut warnings);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "duration_source".to_string(),
        rule_name: "Duration Source Selection".to_string(),
        input: serde_json::json!({
            "total_minutes_final": record.total_minutes_final,
            "total_minutes_raw": record.total_minutes_raw,
            "time_in": record.time_in.map(|t| t.to_string()),
            "time_out": record.time_out.map(|t| t.to_string()),
        }),
        output: serde_json::json!({
            "source": source,
            "raw_hours": raw_hours.normalize().to_string(),
        }),
        reasoning: source_reasoning(source).to_string(),
    });
    step_number += 1;

    if source == DurationSource::Active {
        return AttendanceCalculation {
            duration: DerivedDuration {
                raw_hours,
                lunch_deduction_hours: Decimal::ZERO,
                effective_hours: raw_hours,
                regular_hours: Decimal::ZERO,
                overtime_hours: Decimal::ZERO,
                source,
                is_active: true,
            },
            audit_steps,
            warnings,
        };
    }

    let lunch = apply_lunch_deduction(raw_hours, record.is_field_engineer, policy, step_number);
    audit_steps.push(lunch.audit_step);
    step_number += 1;

    let overtime = detect_daily_overtime(lunch.effective_hours, policy.standard_hours, step_number);
    audit_steps.push(overtime.audit_step);

    AttendanceCalculation {
        duration: DerivedDuration {
            raw_hours,
            lunch_deduction_hours: lunch.deduction_hours,
            effective_hours: lunch.effective_hours,
            regular_hours: overtime.regular_hours,
            overtime_hours: overtime.overtime_hours,
            source,
            is_active: false,
        },
        audit_steps,
        warnings,
    }
}

/// Picks the raw duration by precedence and returns it in rounded hours.
fn resolve_raw_hours(
    record: &AttendanceRecord,
    now: NaiveDateTime,
    warnings: &mut Vec<AuditWarning>,
) -> (DurationSource, Decimal) {
    if let Some(minutes) = record.total_minutes_final {
        return (
            DurationSource::FinalMinutes,
            non_negative_minutes(minutes, "total_minutes_final", warnings),
        );
    }

    if let Some(minutes) = record.total_minutes_raw {
        return (
            DurationSource::RawMinutes,
            non_negative_minutes(minutes, "total_minutes_raw", warnings),
        );
    }

    match (record.time_in, record.time_out) {
        (Some(time_in), Some(time_out)) => (
            DurationSource::Clocked,
            clocked_hours(time_in, time_out, warnings),
        ),
        (Some(time_in), None) => {
            warnings.push(AuditWarning::new(
                "ACTIVE_SESSION",
                "Session has no time out; elapsed time is measured up to now",
            ));
            let seconds = (now - time_in).num_seconds();
            if seconds < 0 {
                warnings.push(AuditWarning::new(
                    "CLOCK_BEFORE_TIME_IN",
                    "Current time is before time in; elapsed time reported as zero",
                ));
            }
            (DurationSource::Active, hours_from_seconds(seconds.max(0)))
        }
        _ => {
            warnings.push(AuditWarning::new(
                "NO_DURATION",
                "Record has neither precomputed minutes nor a time in",
            ));
            (DurationSource::Unavailable, Decimal::ZERO)
        }
    }
}

fn non_negative_minutes(minutes: i64, field: &str, warnings: &mut Vec<AuditWarning>) -> Decimal {
    if minutes < 0 {
        warnings.push(AuditWarning::new(
            "NEGATIVE_DURATION",
            format!("{} is negative ({}); treated as zero", field, minutes),
        ));
        return Decimal::ZERO;
    }
    hours_from_minutes(minutes)
}

/// Hours between clock in and clock out. A time out stamped earlier than the
/// time in is rolled to the next day (overnight session).
fn clocked_hours(
    time_in: NaiveDateTime,
    time_out: NaiveDateTime,
    warnings: &mut Vec<AuditWarning>,
) -> Decimal {
    let seconds = (time_out - time_in).num_seconds();
    if seconds >= 0 {
        return hours_from_seconds(seconds);
    }

    let rolled = time_out
        .checked_add_days(Days::new(1))
        .map(|next_day| (next_day - time_in).num_seconds())
        .filter(|seconds| *seconds >= 0);

    match rolled {
        Some(seconds) => {
            warnings.push(AuditWarning::new(
                "OVERNIGHT_ROLLOVER",
                "Time out precedes time in; time out moved to the next day",
            ));
            hours_from_seconds(seconds)
        }
        None => {
            warnings.push(AuditWarning::new(
                "NEGATIVE_DURATION",
                "Time out is more than a day before time in; treated as zero",
            ));
            Decimal::ZERO
        }
    }
}

fn source_reasoning(source: DurationSource) -> &'static str {
    match source {
        DurationSource::FinalMinutes => "Corrected total minutes take precedence",
        DurationSource::RawMinutes => "Captured total minutes take precedence over clock times",
        DurationSource::Clocked => "Duration measured from time in to time out",
        DurationSource::Active => "Session still open, duration measured from time in to now",
        DurationSource::Unavailable => "No duration input available",
    }
}
