//! Field Engineer lunch deduction.
//!
//! Field Engineers have one hour of lunch taken off any session whose raw
//! length exceeds the lunch threshold (5 hours by default). Nobody else is
//! deducted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::WorkdayPolicy;
use crate::models::AuditStep;

use super::rounding::round_hours;

/// The result of applying the lunch rule to a raw duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunchDeductionResult {
    /// Hours deducted (zero or the configured lunch length).
    pub deduction_hours: Decimal,
    /// Raw hours minus the deduction, floored at zero.
    pub effective_hours: Decimal,
    /// The audit step recording the decision.
    pub audit_step: AuditStep,
}

/// Applies the lunch deduction rule.
///
/// The deduction applies only when `is_field_engineer` is set and
/// `raw_hours` is strictly greater than the policy threshold.
///
/// # Examples
///
/// ```
/// use sla_engine::calculation::apply_lunch_deduction;
/// use sla_engine::config::WorkdayPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = WorkdayPolicy::default();
///
/// let engineer = apply_lunch_deduction(Decimal::from(9), true, &policy, 1);
/// assert_eq!(engineer.effective_hours, Decimal::from(8));
///
/// let office = apply_lunch_deduction(Decimal::from(9), false, &policy, 1);
/// assert_eq!(office.effective_hours, Decimal::from(9));
/// ```
pub fn apply_lunch_deduction(
    raw_hours: Decimal,
    is_field_engineer: bool,
    policy: &WorkdayPolicy,
    step_number: u32,
) -> LunchDeductionResult {
    let applies = is_field_engineer && raw_hours > policy.lunch_threshold_hours;

    let deduction_hours = if applies {
        round_hours(policy.lunch_deduction_hours)
    } else {
        Decimal::ZERO
    };

    let effective_hours = round_hours((raw_hours - deduction_hours).max(Decimal::ZERO));

    let reasoning = if applies {
        format!(
            "Field Engineer session of {} hours exceeds {} hour threshold, {} hour lunch deducted",
            raw_hours.normalize(),
            policy.lunch_threshold_hours.normalize(),
            deduction_hours.normalize()
        )
    } else if is_field_engineer {
        format!(
            "Field Engineer session of {} hours does not exceed {} hour threshold, no lunch deducted",
            raw_hours.normalize(),
            policy.lunch_threshold_hours.normalize()
        )
    } else {
        "Not a Field Engineer, no lunch deducted".to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "lunch_deduction".to_string(),
        rule_name: "Field Engineer Lunch Deduction".to_string(),
        input: serde_json::json!({
            "raw_hours": raw_hours.normalize().to_string(),
            "is_field_engineer": is_field_engineer,
            "threshold": policy.lunch_threshold_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "lunch_deduction_hours": deduction_hours.normalize().to_string(),
            "effective_hours": effective_hours.normalize().to_string()
        }),
        reasoning,
    };

    LunchDeductionResult {
        deduction_hours,
        effective_hours,
        audit_step,
    }
}
