//! Calculation logic for the SLA engine.
//!
//! This module contains the attendance duration calculator (raw hours,
//! Field Engineer lunch deduction, regular/overtime split), the ticket SLA
//! calculator (elapsed time, pause subtraction, threshold classification),
//! the per-day summary, and the batch report paths built on top of them.
//!
//! All functions are pure: the only clock they see is the `now` argument.

mod attendance_duration;
mod daily_overtime;
mod daily_summary;
mod lunch_deduction;
mod pause_interval;
mod report;
mod rounding;
mod sla;
mod time_of_day;

pub use attendance_duration::{
    AttendanceCalculation, calculate_attendance, compute_attendance_duration,
};
pub use daily_overtime::{DailyOvertimeDetection, detect_daily_overtime};
pub use daily_summary::{DailySummaryCalculation, calculate_day, summarize_day};
pub use lunch_deduction::{LunchDeductionResult, apply_lunch_deduction};
pub use pause_interval::{PauseInterval, PauseSubtraction, subtract_pauses};
pub use report::{
    AttendanceReportRow, RowError, SeverityLookup, SlaReport, SlaReportRow, attendance_report,
    sla_report,
};
pub use rounding::{hours_from_minutes, hours_from_seconds, round_hours};
pub use sla::{SlaCalculation, calculate_sla, calculate_sla_for_severity, compute_sla};
pub use time_of_day::{overnight_span_seconds, parse_date, parse_time_of_day};
