//! Core data models for the SLA engine.
//!
//! This module contains the input records, computed results and audit types
//! used throughout the engine.

mod attendance;
mod audit;
mod daily_summary;
mod ticket;

pub use attendance::{AttendanceRecord, DerivedDuration, DurationSource};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use daily_summary::{DailySummary, LunchDeductionMode};
pub(crate) use ticket::present;
pub use ticket::{Severity, SlaResult, SlaStatus, TicketSlaInput};
