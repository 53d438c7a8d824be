//! Batch reporting over many attendance rows or tickets.
//!
//! These are the spreadsheet-export paths: each row is computed on its own,
//! and for tickets a rejected row is recorded with its reason instead of
//! aborting the batch.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{SlaPolicy, WorkdayPolicy};
use crate::models::{AttendanceRecord, Severity, SlaStatus, TicketSlaInput, present};

use super::attendance_duration::compute_attendance_duration;
use super::sla::calculate_sla_for_severity;

/// Memoized severity normalization for one batch.
///
/// Legacy exports repeat the same handful of free-text severities thousands
/// of times. Build one lookup per batch and pass it down; it is not shared
/// between requests.
#[derive(Debug, Default)]
pub struct SeverityLookup {
    resolved: HashMap<String, Option<Severity>>,
}

impl SeverityLookup {
    /// Creates an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a raw severity, parsing each distinct spelling once.
    ///
    /// ```
    /// use sla_engine::calculation::SeverityLookup;
    /// use sla_engine::models::Severity;
    ///
    /// let mut lookup = SeverityLookup::new();
    /// assert_eq!(lookup.resolve("Sev 1"), Some(Severity::Sev1));
    /// assert_eq!(lookup.resolve("Sev 1"), Some(Severity::Sev1));
    /// assert_eq!(lookup.len(), 1);
    /// ```
    pub fn resolve(&mut self, raw: &str) -> Option<Severity> {
        if let Some(severity) = self.resolved.get(raw) {
            return *severity;
        }
        let severity = Severity::parse(raw);
        self.resolved.insert(raw.to_string(), severity);
        severity
    }

    /// Number of distinct spellings seen.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Returns true if nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// One attendance row of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReportRow {
    /// Identifier of the source record.
    pub id: Option<String>,
    /// Shift date.
    pub date: NaiveDate,
    /// Raw hours before deduction.
    pub total_hours: Decimal,
    /// Lunch hours deducted.
    pub lunch_deduction_hours: Decimal,
    /// Regular hours.
    pub regular_hours: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
    /// True while the session is open.
    pub is_active: bool,
}

/// Computes export columns for each attendance record.
///
/// All rows share the single `now` snapshot.
pub fn attendance_report(
    records: &[AttendanceRecord],
    now: NaiveDateTime,
    policy: &WorkdayPolicy,
) -> Vec<AttendanceReportRow> {
    records
        .iter()
        .map(|record| {
            let duration = compute_attendance_duration(record, now, policy);
            AttendanceReportRow {
                id: record.id.clone(),
                date: record.date,
                total_hours: duration.raw_hours,
                lunch_deduction_hours: duration.lunch_deduction_hours,
                regular_hours: duration.regular_hours,
                overtime_hours: duration.overtime_hours,
                is_active: duration.is_active,
            }
        })
        .collect()
}

/// Why a ticket row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// The offending field, when the error names one.
    pub field: Option<String>,
    /// Human-readable reason.
    pub message: String,
}

/// One ticket row of an SLA export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaReportRow {
    /// 1-based row number within the batch.
    pub row: usize,
    /// Identifier of the ticket.
    pub ticket_id: Option<String>,
    /// Hours counted against the SLA.
    pub sla_count_hours: Option<Decimal>,
    /// Pass/fail verdict.
    pub sla_status: Option<SlaStatus>,
    /// Set when the row was rejected.
    pub error: Option<RowError>,
}

/// SLA results for a batch of tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaReport {
    /// Rows in input order.
    pub rows: Vec<SlaReportRow>,
    /// Rows that met their threshold.
    pub passed: usize,
    /// Rows that missed their threshold.
    pub failed: usize,
    /// Rows not computable yet.
    pub pending: usize,
    /// Rows rejected by validation.
    pub rejected: usize,
}

/// Computes the SLA of every ticket in the batch.
///
/// # Examples
///
/// ```
/// use sla_engine::calculation::sla_report;
/// use sla_engine::config::SlaPolicy;
/// use sla_engine::models::TicketSlaInput;
///
/// let good = TicketSlaInput {
///     severity: Some("sev1".to_string()),
///     date_acknowledged: Some("2024-01-01".to_string()),
///     time_acknowledged: Some("09:00".to_string()),
///     date_attended: Some("2024-01-01".to_string()),
///     work_end: Some("11:00".to_string()),
///     ..TicketSlaInput::default()
/// };
/// let bad = TicketSlaInput {
///     work_end: Some("eleven".to_string()),
///     ..good.clone()
/// };
///
/// let report = sla_report(&[good, bad], &SlaPolicy::default());
/// assert_eq!(report.passed, 1);
/// assert_eq!(report.rejected, 1);
/// ```
pub fn sla_report(inputs: &[TicketSlaInput], policy: &SlaPolicy) -> SlaReport {
    let mut lookup = SeverityLookup::new();
    let mut report = SlaReport::default();

    for (index, input) in inputs.iter().enumerate() {
        let row = evaluate_row(index + 1, input, policy, &mut lookup);

        match (&row.error, row.sla_status) {
            (Some(_), _) => report.rejected += 1,
            (None, Some(SlaStatus::Passed)) => report.passed += 1,
            (None, Some(SlaStatus::Failed)) => report.failed += 1,
            (None, None) => report.pending += 1,
        }
        report.rows.push(row);
    }

    debug!(
        rows = inputs.len(),
        passed = report.passed,
        failed = report.failed,
        pending = report.pending,
        rejected = report.rejected,
        distinct_severities = lookup.len(),
        "SLA report computed"
    );

    report
}

fn evaluate_row(
    row: usize,
    input: &TicketSlaInput,
    policy: &SlaPolicy,
    lookup: &mut SeverityLookup,
) -> SlaReportRow {
    let severity = present(&input.severity).and_then(|raw| lookup.resolve(raw));

    match calculate_sla_for_severity(input, severity, policy, 1) {
        Ok(calculation) => SlaReportRow {
            row,
            ticket_id: input.ticket_id.clone(),
            sla_count_hours: calculation.result.sla_count_hours,
            sla_status: calculation.result.sla_status,
            error: None,
        },
        Err(err) => {
            warn!(
                row,
                ticket_id = input.ticket_id.as_deref().unwrap_or("-"),
                error = %err,
                "Rejected ticket row"
            );
            SlaReportRow {
                row,
                ticket_id: input.ticket_id.clone(),
                sla_count_hours: None,
                sla_status: None,
                error: Some(RowError {
                    field: err.field().map(str::to_string),
                    message: err.to_string(),
                }),
            }
        }
    }
}
