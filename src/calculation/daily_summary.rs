//! Per-day attendance summary.
//!
//! An employee can clock several sessions on one day. The live dashboard
//! deducts the Field Engineer lunch hour from each session on its own; the
//! spreadsheet export sums the sessions first and deducts once. Both are
//! available through [`LunchDeductionMode`]; the workday policy picks the
//! default.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::WorkdayPolicy;
use crate::models::{AttendanceRecord, AuditStep, AuditWarning, DailySummary, LunchDeductionMode};

use super::attendance_duration::calculate_attendance;
use super::daily_overtime::detect_daily_overtime;
use super::lunch_deduction::apply_lunch_deduction;
use super::rounding::round_hours;

/// A daily summary together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummaryCalculation {
    /// The computed summary.
    pub summary: DailySummary,
    /// Audit steps for the day-level rules.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised by any session.
    pub warnings: Vec<AuditWarning>,
}

/// Summarizes all sessions of one employee on `date` using the policy's
/// lunch mode.
///
/// Records dated on another day are skipped. Open sessions are reported in
/// `active_hours` and left out of the regular/overtime split.
///
/// # Examples
///
/// ```
/// use sla_engine::calculation::summarize_day;
/// use sla_engine::config::WorkdayPolicy;
/// use sla_engine::models::AttendanceRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let session = |from: u32, to: u32| AttendanceRecord {
///     id: None,
///     date,
///     time_in: date.and_hms_opt(from, 0, 0),
///     time_out: date.and_hms_opt(to, 0, 0),
///     total_minutes_raw: None,
///     total_minutes_final: None,
///     is_field_engineer: false,
/// };
/// let now = date.and_hms_opt(23, 0, 0).unwrap();
///
/// let summary = summarize_day(date, &[session(7, 12), session(13, 18)], now, &WorkdayPolicy::default());
/// assert_eq!(summary.effective_hours, Decimal::from(10));
/// assert_eq!(summary.overtime_hours, Decimal::from(2));
/// ```
pub fn summarize_day(
    date: NaiveDate,
    records: &[AttendanceRecord],
    now: NaiveDateTime,
    policy: &WorkdayPolicy,
) -> DailySummary {
    calculate_day(date, records, now, policy, policy.lunch_mode).summary
}

/// Summarizes one employee-day with an explicit lunch mode.
pub fn calculate_day(
    date: NaiveDate,
    records: &[AttendanceRecord],
    now: NaiveDateTime,
    policy: &WorkdayPolicy,
    lunch_mode: LunchDeductionMode,
) -> DailySummaryCalculation {
    let day_records: Vec<&AttendanceRecord> = records.iter().filter(|r| r.date == date).collect();
    if day_records.len() < records.len() {
        debug!(
            date = %date,
            skipped = records.len() - day_records.len(),
            "Skipping attendance records dated on another day"
        );
    }

    // Per-day mode takes lunch once at the end, so sessions are measured
    // without it.
    let session_policy = match lunch_mode {
        LunchDeductionMode::PerSession => policy.clone(),
        LunchDeductionMode::PerDay => WorkdayPolicy {
            lunch_deduction_hours: Decimal::ZERO,
            ..policy.clone()
        },
    };

    let mut sessions = Vec::with_capacity(day_records.len());
    let mut warnings = Vec::new();
    let mut raw_hours = Decimal::ZERO;
    let mut active_hours = Decimal::ZERO;
    let mut session_lunch = Decimal::ZERO;
    let mut session_effective = Decimal::ZERO;
    let mut any_field_engineer = false;

    for record in day_records {
        let calculation = calculate_attendance(record, now, &session_policy, 1);
        let duration = calculation.duration;
        warnings.extend(calculation.warnings);

        if duration.is_active {
            active_hours += duration.raw_hours;
        } else {
            raw_hours += duration.raw_hours;
            session_lunch += duration.lunch_deduction_hours;
            session_effective += duration.effective_hours;
            any_field_engineer |= record.is_field_engineer;
        }
        sessions.push(duration);
    }

    let mut audit_steps = Vec::new();
    let mut step_number = 1;

    let (lunch_deduction_hours, effective_hours) = match lunch_mode {
        LunchDeductionMode::PerSession => (session_lunch, session_effective),
        LunchDeductionMode::PerDay => {
            let lunch = apply_lunch_deduction(raw_hours, any_field_engineer, policy, step_number);
            audit_steps.push(lunch.audit_step);
            step_number += 1;
            (lunch.deduction_hours, lunch.effective_hours)
        }
    };

    let overtime = detect_daily_overtime(effective_hours, policy.standard_hours, step_number);
    audit_steps.push(overtime.audit_step);

    DailySummaryCalculation {
        summary: DailySummary {
            date,
            lunch_mode,
            raw_hours: round_hours(raw_hours),
            lunch_deduction_hours: round_hours(lunch_deduction_hours),
            effective_hours: round_hours(effective_hours),
            regular_hours: round_hours(overtime.regular_hours),
            overtime_hours: round_hours(overtime.overtime_hours),
            active_hours: round_hours(active_hours),
            sessions,
        },
        audit_steps,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn session(from: (u32, u32), to: Option<(u32, u32)>, field_engineer: bool) -> AttendanceRecord {
        AttendanceRecord {
            id: None,
            date: date(),
            time_in: date().and_hms_opt(from.0, from.1, 0),
            time_out: to.and_then(|(h, m)| date().and_hms_opt(h, m, 0)),
            total_minutes_raw: None,
            total_minutes_final: None,
            is_field_engineer: field_engineer,
        }
    }

    fn now() -> NaiveDateTime {
        date().and_hms_opt(22, 0, 0).unwrap()
    }

    #[test]
    fn test_per_session_deducts_each_long_session() {
        // Two 6 hour sessions, each over the 5 hour threshold
        let records = [
            session((6, 0), Some((12, 0)), true),
            session((13, 0), Some((19, 0)), true),
        ];

        let calc = calculate_day(
            date(),
            &records,
            now(),
            &WorkdayPolicy::default(),
            LunchDeductionMode::PerSession,
        );
        let summary = calc.summary;

        assert_eq!(summary.raw_hours, dec("12"));
        assert_eq!(summary.lunch_deduction_hours, dec("2"));
        assert_eq!(summary.effective_hours, dec("10"));
        assert_eq!(summary.regular_hours, dec("8"));
        assert_eq!(summary.overtime_hours, dec("2"));
        assert_eq!(summary.sessions.len(), 2);
    }

    #[test]
    fn test_per_day_deducts_once() {
        let records = [
            session((6, 0), Some((12, 0)), true),
            session((13, 0), Some((19, 0)), true),
        ];

        let calc = calculate_day(
            date(),
            &records,
            now(),
            &WorkdayPolicy::default(),
            LunchDeductionMode::PerDay,
        );
        let summary = calc.summary;

        assert_eq!(summary.lunch_deduction_hours, dec("1"));
        assert_eq!(summary.effective_hours, dec("11"));
        assert_eq!(summary.overtime_hours, dec("3"));
        assert!(summary
            .sessions
            .iter()
            .all(|s| s.lunch_deduction_hours == Decimal::ZERO));
        assert_eq!(calc.audit_steps[0].rule_id, "lunch_deduction");
    }

    #[test]
    fn test_per_day_short_sessions_summing_over_threshold() {
        // Neither 3 hour session qualifies alone; the 6 hour day does
        let records = [
            session((8, 0), Some((11, 0)), true),
            session((12, 0), Some((15, 0)), true),
        ];

        let per_session = calculate_day(
            date(),
            &records,
            now(),
            &WorkdayPolicy::default(),
            LunchDeductionMode::PerSession,
        );
        let per_day = calculate_day(
            date(),
            &records,
            now(),
            &WorkdayPolicy::default(),
            LunchDeductionMode::PerDay,
        );

        assert_eq!(per_session.summary.effective_hours, dec("6"));
        assert_eq!(per_day.summary.effective_hours, dec("5"));
    }

    #[test]
    fn test_active_session_excluded_from_split() {
        let records = [
            session((6, 0), Some((14, 0)), false),
            session((15, 0), None, false),
        ];

        let calc = calculate_day(
            date(),
            &records,
            now(),
            &WorkdayPolicy::default(),
            LunchDeductionMode::PerSession,
        );

        assert_eq!(calc.summary.raw_hours, dec("8"));
        assert_eq!(calc.summary.active_hours, dec("7"));
        assert_eq!(calc.summary.overtime_hours, Decimal::ZERO);
        assert!(calc.warnings.iter().any(|w| w.code == "ACTIVE_SESSION"));
    }

    #[test]
    fn test_records_from_other_days_are_skipped() {
        let mut other = session((8, 0), Some((16, 0)), false);
        other.date = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        let records = [session((8, 0), Some((12, 0)), false), other];

        let summary = summarize_day(date(), &records, now(), &WorkdayPolicy::default());

        assert_eq!(summary.raw_hours, dec("4"));
        assert_eq!(summary.sessions.len(), 1);
    }

    #[test]
    fn test_empty_day() {
        let summary = summarize_day(date(), &[], now(), &WorkdayPolicy::default());

        assert_eq!(summary.raw_hours, Decimal::ZERO);
        assert_eq!(summary.effective_hours, Decimal::ZERO);
        assert!(summary.sessions.is_empty());
    }

    #[test]
    fn test_summarize_day_uses_policy_mode() {
        let records = [
            session((6, 0), Some((12, 0)), true),
            session((13, 0), Some((19, 0)), true),
        ];
        let policy = WorkdayPolicy {
            lunch_mode: LunchDeductionMode::PerDay,
            ..WorkdayPolicy::default()
        };

        let summary = summarize_day(date(), &records, now(), &policy);

        assert_eq!(summary.lunch_mode, LunchDeductionMode::PerDay);
        assert_eq!(summary.lunch_deduction_hours, dec("1"));
    }
}
