//! Daily overtime detection functionality.
//!
//! This module splits effective hours into regular hours (up to the standard
//! workday) and overtime hours (anything beyond it).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

use super::rounding::round_hours;

/// Regular/overtime split of a session or a whole day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyOvertimeDetection {
    /// Hours up to the threshold.
    pub regular_hours: Decimal,
    /// Hours exceeding the threshold (can be zero).
    pub overtime_hours: Decimal,
    /// The audit step recording this detection.
    pub audit_step: AuditStep,
}

/// Detects whether effective hours exceed the standard workday.
///
/// `regular_hours = min(effective, threshold)` and
/// `overtime_hours = max(0, effective - threshold)`.
///
/// # Examples
///
/// ## At threshold (no overtime)
///
/// ```
/// use sla_engine::calculation::detect_daily_overtime;
/// use sla_engine::config::DEFAULT_STANDARD_WORKDAY_HOURS;
/// use rust_decimal::Decimal;
///
/// let result = detect_daily_overtime(Decimal::from(8), DEFAULT_STANDARD_WORKDAY_HOURS, 1);
///
/// assert_eq!(result.regular_hours, Decimal::from(8));
/// assert_eq!(result.overtime_hours, Decimal::ZERO);
/// ```
///
/// ## Exceeding threshold
///
/// ```
/// use sla_engine::calculation::detect_daily_overtime;
/// use sla_engine::config::DEFAULT_STANDARD_WORKDAY_HOURS;
/// use rust_decimal::Decimal;
///
/// let result = detect_daily_overtime(Decimal::new(105, 1), DEFAULT_STANDARD_WORKDAY_HOURS, 1);
///
/// assert_eq!(result.regular_hours, Decimal::from(8));
/// assert_eq!(result.overtime_hours, Decimal::new(25, 1));
/// ```
pub fn detect_daily_overtime(
    effective_hours: Decimal,
    threshold: Decimal,
    step_number: u32,
) -> DailyOvertimeDetection {
    let regular_hours = round_hours(effective_hours.min(threshold).max(Decimal::ZERO));
    let overtime_hours = round_hours((effective_hours - threshold).max(Decimal::ZERO));

    let reasoning = if overtime_hours > Decimal::ZERO {
        format!(
            "{} hours exceeds {} hour workday by {} hours, triggering overtime",
            effective_hours.normalize(),
            threshold.normalize(),
            overtime_hours.normalize()
        )
    } else if effective_hours == threshold {
        format!(
            "{} hours equals {} hour workday, no overtime triggered",
            effective_hours.normalize(),
            threshold.normalize()
        )
    } else {
        format!(
            "{} hours is under {} hour workday, no overtime triggered",
            effective_hours.normalize(),
            threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_overtime_detection".to_string(),
        rule_name: "Daily Overtime Detection".to_string(),
        input: serde_json::json!({
            "effective_hours": effective_hours.normalize().to_string(),
            "threshold": threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "regular_hours": regular_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string()
        }),
        reasoning,
    };

    DailyOvertimeDetection {
        regular_hours,
        overtime_hours,
        audit_step,
    }
}
