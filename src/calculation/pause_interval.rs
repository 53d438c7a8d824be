//! Pause intervals excluded from the SLA clock.
//!
//! A ticket carries up to two pause pairs. Each pair is all-or-nothing, spans
//! midnight when its end is not later than its start, and is subtracted in
//! order from whatever SLA time remains.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::rounding::hours_from_seconds;
use super::time_of_day::{overnight_span_seconds, parse_time_of_day};

/// A validated pause window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseInterval {
    /// Name of the field holding the pause start.
    pub start_field: &'static str,
    /// Name of the field holding the pause end.
    pub end_field: &'static str,
    /// When the pause started.
    pub start: NaiveTime,
    /// When the pause ended.
    pub end: NaiveTime,
}

impl PauseInterval {
    /// Builds a pause from its two raw fields.
    ///
    /// Returns `Ok(None)` when both halves are absent.
    ///
    /// # Errors
    ///
    /// - [`EngineError::IncompletePause`] when only one half is supplied
    /// - [`EngineError::InvalidTimeFormat`] when a half is not a time of day
    ///
    /// # Examples
    ///
    /// ```
    /// use sla_engine::calculation::PauseInterval;
    ///
    /// let pause = PauseInterval::from_fields("pause_start", Some("12:00"), "pause_end", Some("13:00"))
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(pause.duration_seconds(), 3600);
    ///
    /// assert!(PauseInterval::from_fields("pause_start", Some("12:00"), "pause_end", None).is_err());
    /// assert!(PauseInterval::from_fields("pause_start", None, "pause_end", None).unwrap().is_none());
    /// ```
    pub fn from_fields(
        start_field: &'static str,
        start: Option<&str>,
        end_field: &'static str,
        end: Option<&str>,
    ) -> EngineResult<Option<Self>> {
        match (start, end) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(EngineError::IncompletePause {
                field: end_field.to_string(),
                counterpart: start_field.to_string(),
            }),
            (None, Some(_)) => Err(EngineError::IncompletePause {
                field: start_field.to_string(),
                counterpart: end_field.to_string(),
            }),
            (Some(start), Some(end)) => Ok(Some(Self {
                start_field,
                end_field,
                start: parse_time_of_day(start_field, start)?,
                end: parse_time_of_day(end_field, end)?,
            })),
        }
    }

    /// Length of the pause in seconds; an end at or before the start means
    /// the pause ran past midnight.
    pub fn duration_seconds(&self) -> i64 {
        overnight_span_seconds(self.start, self.end)
    }
}

/// The result of subtracting pauses from an elapsed SLA span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseSubtraction {
    /// Seconds left after all pauses.
    pub remaining_seconds: i64,
    /// Total seconds of pause subtracted.
    pub paused_seconds: i64,
    /// One audit step per pause applied.
    pub audit_steps: Vec<AuditStep>,
}

/// Subtracts pauses in order from `elapsed_seconds`.
///
/// Each pause is checked against what remains at the moment it is applied,
/// so the second pause is validated against the remainder after the first.
///
/// # Errors
///
/// Returns [`EngineError::PauseExceedsDuration`] when a pause is longer than
/// the time it is subtracted from.
pub fn subtract_pauses(
    elapsed_seconds: i64,
    pauses: &[PauseInterval],
    start_step_number: u32,
) -> EngineResult<PauseSubtraction> {
    let mut remaining_seconds = elapsed_seconds;
    let mut paused_seconds = 0;
    let mut audit_steps = Vec::with_capacity(pauses.len());

    for (offset, pause) in pauses.iter().enumerate() {
        let pause_seconds = pause.duration_seconds();

        if pause_seconds > remaining_seconds {
            return Err(EngineError::PauseExceedsDuration {
                field: pause.end_field.to_string(),
                pause_hours: hours_from_seconds(pause_seconds).normalize(),
                remaining_hours: hours_from_seconds(remaining_seconds.max(0)).normalize(),
            });
        }

        let before = remaining_seconds;
        remaining_seconds -= pause_seconds;
        paused_seconds += pause_seconds;

        audit_steps.push(AuditStep {
            step_number: start_step_number + offset as u32,
            rule_id: "pause_subtraction".to_string(),
            rule_name: "SLA Pause Subtraction".to_string(),
            input: serde_json::json!({
                "pause": pause.start_field,
                "start": pause.start.to_string(),
                "end": pause.end.to_string(),
                "remaining_hours": hours_from_seconds(before).normalize().to_string()
            }),
            output: serde_json::json!({
                "pause_hours": hours_from_seconds(pause_seconds).normalize().to_string(),
                "remaining_hours": hours_from_seconds(remaining_seconds).normalize().to_string()
            }),
            reasoning: if pause.end <= pause.start {
                format!(
                    "Pause {} to {} runs past midnight and is excluded from the SLA clock",
                    pause.start, pause.end
                )
            } else {
                format!(
                    "Pause {} to {} is excluded from the SLA clock",
                    pause.start, pause.end
                )
            },
        });
    }

    Ok(PauseSubtraction {
        remaining_seconds,
        paused_seconds,
        audit_steps,
    })
}
