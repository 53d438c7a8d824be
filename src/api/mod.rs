//! HTTP API module for the SLA engine.
//!
//! This module exposes the calculators to the portal's record-update and
//! export handlers over JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceDurationRequest, AttendanceReportRequest, DailySummaryRequest, SlaBatchRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, AttendanceReportResponse, CalculationMeta, DailySummaryResponse,
    DurationResponse, SlaBatchResponse, SlaResponse,
};
pub use state::AppState;
