//! Ticket SLA input and result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket severity tier.
///
/// Legacy rows carry free-text severities, so parsing is lenient about case,
/// spaces, dashes and underscores and returns `None` for anything else.
///
/// # Example
///
/// ```
/// use sla_engine::models::Severity;
///
/// assert_eq!(Severity::parse("Sev 2"), Some(Severity::Sev2));
/// assert_eq!(Severity::parse("SEV-4"), Some(Severity::Sev4));
/// assert_eq!(Severity::parse("urgent"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical outage.
    Sev1,
    /// Major impact.
    Sev2,
    /// Minor impact.
    Sev3,
    /// Cosmetic or request.
    Sev4,
}

impl Severity {
    /// Parses a free-text severity.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "sev1" => Some(Severity::Sev1),
            "sev2" => Some(Severity::Sev2),
            "sev3" => Some(Severity::Sev3),
            "sev4" => Some(Severity::Sev4),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Sev1 => "sev1",
            Severity::Sev2 => "sev2",
            Severity::Sev3 => "sev3",
            Severity::Sev4 => "sev4",
        };
        write!(f, "{}", label)
    }
}

/// Raw ticket fields relevant to the SLA clock.
///
/// Fields are kept as the strings the portal form submits; empty strings are
/// treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSlaInput {
    /// Identifier of the ticket, carried into reports.
    #[serde(default)]
    pub ticket_id: Option<String>,
    /// Severity tier as entered (`sev1`..`sev4`).
    #[serde(default)]
    pub severity: Option<String>,
    /// Date the ticket was acknowledged (`YYYY-MM-DD`).
    #[serde(default)]
    pub date_acknowledged: Option<String>,
    /// Time the ticket was acknowledged (`HH:MM[:SS]`).
    #[serde(default)]
    pub time_acknowledged: Option<String>,
    /// Date on-site work happened.
    #[serde(default)]
    pub date_attended: Option<String>,
    /// Time on-site work started.
    #[serde(default)]
    pub work_start: Option<String>,
    /// Time on-site work ended.
    #[serde(default)]
    pub work_end: Option<String>,
    /// Start of the first pause.
    #[serde(default)]
    pub pause_start: Option<String>,
    /// End of the first pause.
    #[serde(default)]
    pub pause_end: Option<String>,
    /// Start of the second pause.
    #[serde(default)]
    pub pause_start2: Option<String>,
    /// End of the second pause.
    #[serde(default)]
    pub pause_end2: Option<String>,
}

/// Returns the trimmed value of an optional form field, `None` when blank.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// SLA verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlaStatus {
    /// Completed within the severity threshold (inclusive).
    Passed,
    /// Completed after the severity threshold.
    Failed,
}

impl fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlaStatus::Passed => write!(f, "Passed"),
            SlaStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// The outcome of an SLA computation.
///
/// All fields are `None` when the SLA cannot be computed yet (missing
/// timestamps or unrecognized severity). That state is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaResult {
    /// Hours counted against the SLA, after pauses.
    pub sla_count_hours: Option<Decimal>,
    /// Pass/fail verdict.
    pub sla_status: Option<SlaStatus>,
    /// The recognized severity tier.
    pub severity: Option<Severity>,
    /// The threshold applied for the severity.
    pub threshold_hours: Option<Decimal>,
    /// Hours from acknowledgement to completion, before pauses.
    pub elapsed_hours: Option<Decimal>,
    /// Total pause hours subtracted.
    pub pause_hours: Option<Decimal>,
}

impl SlaResult {
    /// The "not yet computable" result.
    pub fn pending() -> Self {
        Self::default()
    }

    /// Returns true when the SLA could be computed.
    pub fn is_computed(&self) -> bool {
        self.sla_status.is_some()
    }
}
