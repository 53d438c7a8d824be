//! Request types for the SLA engine API.
//!
//! Ticket endpoints accept [`TicketSlaInput`] as-is; attendance endpoints
//! wrap records with an optional `as_of` clock so a caller can pin "now".

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, LunchDeductionMode, TicketSlaInput};

/// Request body for `POST /attendance/duration`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceDurationRequest {
    /// The session to measure.
    pub record: AttendanceRecord,
    /// Clock value for an open session; defaults to the server's local time.
    #[serde(default)]
    pub as_of: Option<NaiveDateTime>,
}

/// Request body for `POST /attendance/daily-summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummaryRequest {
    /// The day to summarize.
    pub date: NaiveDate,
    /// All sessions of one employee on that day.
    pub records: Vec<AttendanceRecord>,
    /// Overrides the configured lunch mode.
    #[serde(default)]
    pub lunch_mode: Option<LunchDeductionMode>,
    /// Clock value for open sessions.
    #[serde(default)]
    pub as_of: Option<NaiveDateTime>,
}

/// Request body for `POST /attendance/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceReportRequest {
    /// Rows to export.
    pub records: Vec<AttendanceRecord>,
    /// Clock value shared by all open sessions.
    #[serde(default)]
    pub as_of: Option<NaiveDateTime>,
}

/// Request body for `POST /tickets/sla/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaBatchRequest {
    /// Tickets to evaluate.
    pub tickets: Vec<TicketSlaInput>,
}
