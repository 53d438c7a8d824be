//! Ticket SLA calculation.
//!
//! The SLA clock runs from acknowledgement to the end of on-site work, minus
//! sanctioned pauses. The counted hours are then compared, inclusively,
//! against the threshold for the ticket's severity.
//!
//! Three outcomes are possible:
//! - a computed [`SlaResult`] with a `Passed`/`Failed` verdict
//! - a pending [`SlaResult`] (all fields `None`) when a required timestamp is
//!   missing or the severity is not recognized
//! - an [`EngineError`] validation failure, which must reject the whole
//!   update

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::config::SlaPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, Severity, SlaResult, SlaStatus, TicketSlaInput, present,
};

use super::pause_interval::{PauseInterval, subtract_pauses};
use super::rounding::hours_from_seconds;
use super::time_of_day::{parse_date, parse_time_of_day};

/// An SLA result together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaCalculation {
    /// The computed (or pending) result.
    pub result: SlaResult,
    /// Audit steps in application order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings, e.g. why the SLA is not computable yet.
    pub warnings: Vec<AuditWarning>,
}

/// Every supplied field parsed; absent fields stay `None`.
struct ParsedTicket {
    date_acknowledged: Option<NaiveDate>,
    time_acknowledged: Option<NaiveTime>,
    date_attended: Option<NaiveDate>,
    work_start: Option<NaiveTime>,
    work_end: Option<NaiveTime>,
    pauses: Vec<PauseInterval>,
}

impl ParsedTicket {
    /// Parses all supplied fields, failing on the first malformed one.
    fn parse(input: &TicketSlaInput) -> EngineResult<Self> {
        let date = |field: &str, value: &Option<String>| {
            present(value).map(|v| parse_date(field, v)).transpose()
        };
        let time = |field: &str, value: &Option<String>| {
            present(value)
                .map(|v| parse_time_of_day(field, v))
                .transpose()
        };

        let parsed = Self {
            date_acknowledged: date("date_acknowledged", &input.date_acknowledged)?,
            time_acknowledged: time("time_acknowledged", &input.time_acknowledged)?,
            date_attended: date("date_attended", &input.date_attended)?,
            work_start: time("work_start", &input.work_start)?,
            work_end: time("work_end", &input.work_end)?,
            pauses: [
                PauseInterval::from_fields(
                    "pause_start",
                    present(&input.pause_start),
                    "pause_end",
                    present(&input.pause_end),
                )?,
                PauseInterval::from_fields(
                    "pause_start2",
                    present(&input.pause_start2),
                    "pause_end2",
                    present(&input.pause_end2),
                )?,
            ]
            .into_iter()
            .flatten()
            .collect(),
        };

        Ok(parsed)
    }

    fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.date_acknowledged.is_none() {
            missing.push("date_acknowledged");
        }
        if self.time_acknowledged.is_none() {
            missing.push("time_acknowledged");
        }
        if self.date_attended.is_none() {
            missing.push("date_attended");
        }
        if self.work_end.is_none() {
            missing.push("work_end");
        }
        missing
    }
}

/// Computes the SLA for a ticket.
///
/// # Errors
///
/// Returns a validation error for a malformed date or time, an incomplete
/// pause pair, completion before acknowledgement, or a pause longer than
/// the time it is subtracted from.
///
/// # Examples
///
/// ```
/// use sla_engine::calculation::compute_sla;
/// use sla_engine::config::SlaPolicy;
/// use sla_engine::models::{SlaStatus, TicketSlaInput};
/// use rust_decimal::Decimal;
///
/// let input = TicketSlaInput {
///     severity: Some("sev2".to_string()),
///     date_acknowledged: Some("2024-01-01".to_string()),
///     time_acknowledged: Some("09:00".to_string()),
///     date_attended: Some("2024-01-01".to_string()),
///     work_end: Some("20:00".to_string()),
///     ..TicketSlaInput::default()
/// };
///
/// let result = compute_sla(&input, &SlaPolicy::default()).unwrap();
/// assert_eq!(result.sla_count_hours, Some(Decimal::from(11)));
/// assert_eq!(result.sla_status, Some(SlaStatus::Passed));
/// ```
pub fn compute_sla(input: &TicketSlaInput, policy: &SlaPolicy) -> EngineResult<SlaResult> {
    calculate_sla(input, policy, 1).map(|calculation| calculation.result)
}

/// Computes the SLA for a ticket with its audit steps, numbering steps from
/// `start_step_number`.
pub fn calculate_sla(
    input: &TicketSlaInput,
    policy: &SlaPolicy,
    start_step_number: u32,
) -> EngineResult<SlaCalculation> {
    let severity = present(&input.severity).and_then(Severity::parse);
    calculate_sla_for_severity(input, severity, policy, start_step_number)
}

/// Computes the SLA with a severity the caller already resolved.
///
/// Batch callers resolve severities through a shared lookup and use this
/// entry point; `input.severity` is only used for warning text.
pub fn calculate_sla_for_severity(
    input: &TicketSlaInput,
    severity: Option<Severity>,
    policy: &SlaPolicy,
    start_step_number: u32,
) -> EngineResult<SlaCalculation> {
    let parsed = ParsedTicket::parse(input)?;
    let mut warnings = Vec::new();

    let Some(severity) = severity else {
        let message = match present(&input.severity) {
            Some(raw) => format!("Severity '{}' is not recognized; SLA not computed", raw),
            None => "Severity is missing; SLA not computed".to_string(),
        };
        warnings.push(AuditWarning::new("UNRECOGNIZED_SEVERITY", message));
        return Ok(pending(warnings));
    };

    let (Some(date_acknowledged), Some(time_acknowledged), Some(date_attended), Some(work_end)) = (
        parsed.date_acknowledged,
        parsed.time_acknowledged,
        parsed.date_attended,
        parsed.work_end,
    ) else {
        warnings.push(AuditWarning::new(
            "SLA_NOT_COMPUTABLE",
            format!(
                "Missing {}; SLA not computed",
                parsed.missing_required().join(", ")
            ),
        ));
        return Ok(pending(warnings));
    };

    let mut audit_steps = Vec::new();
    let mut step_number = start_step_number;

    let acknowledged = NaiveDateTime::new(date_acknowledged, time_acknowledged);
    let overnight = parsed.work_start.is_some_and(|start| start > work_end);
    let completion_date = if overnight {
        date_attended
            .checked_add_days(Days::new(1))
            .unwrap_or(date_attended)
    } else {
        date_attended
    };
    let completed = NaiveDateTime::new(completion_date, work_end);

    let elapsed_seconds = (completed - acknowledged).num_seconds();

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "sla_elapsed".to_string(),
        rule_name: "SLA Elapsed Time".to_string(),
        input: serde_json::json!({
            "acknowledged": acknowledged.to_string(),
            "date_attended": date_attended.to_string(),
            "work_start": parsed.work_start.map(|t| t.to_string()),
            "work_end": work_end.to_string()
        }),
        output: serde_json::json!({
            "completed": completed.to_string(),
            "elapsed_hours": hours_from_seconds(elapsed_seconds).normalize().to_string()
        }),
        reasoning: if overnight {
            format!(
                "Work started after it ended on the clock, so completion moves to {}",
                completion_date
            )
        } else {
            "Elapsed time from acknowledgement to end of work".to_string()
        },
    });
    step_number += 1;

    if elapsed_seconds < 0 {
        return Err(EngineError::NegativeElapsed {
            field: "work_end".to_string(),
            hours: hours_from_seconds(-elapsed_seconds).normalize(),
        });
    }

    let subtraction = subtract_pauses(elapsed_seconds, &parsed.pauses, step_number)?;
    step_number += subtraction.audit_steps.len() as u32;
    audit_steps.extend(subtraction.audit_steps);

    let sla_count_hours = hours_from_seconds(subtraction.remaining_seconds.max(0));
    let threshold_hours = policy.threshold(severity);
    let status = if sla_count_hours <= threshold_hours {
        SlaStatus::Passed
    } else {
        SlaStatus::Failed
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "sla_threshold".to_string(),
        rule_name: "SLA Threshold Classification".to_string(),
        input: serde_json::json!({
            "severity": severity,
            "sla_count_hours": sla_count_hours.normalize().to_string(),
            "threshold_hours": threshold_hours.normalize().to_string()
        }),
        output: serde_json::json!({ "sla_status": status }),
        reasoning: match status {
            SlaStatus::Passed => format!(
                "{} hours is within the {} hour {} threshold",
                sla_count_hours.normalize(),
                threshold_hours.normalize(),
                severity
            ),
            SlaStatus::Failed => format!(
                "{} hours exceeds the {} hour {} threshold",
                sla_count_hours.normalize(),
                threshold_hours.normalize(),
                severity
            ),
        },
    });

    Ok(SlaCalculation {
        result: SlaResult {
            sla_count_hours: Some(sla_count_hours),
            sla_status: Some(status),
            severity: Some(severity),
            threshold_hours: Some(threshold_hours),
            elapsed_hours: Some(hours_from_seconds(elapsed_seconds)),
            pause_hours: Some(hours_from_seconds(subtraction.paused_seconds)),
        },
        audit_steps,
        warnings,
    })
}

fn pending(warnings: Vec<AuditWarning>) -> SlaCalculation {
    SlaCalculation {
        result: SlaResult::pending(),
        audit_steps: Vec::new(),
        warnings,
    }
}
