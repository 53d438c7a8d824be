//! Response types for the SLA engine API.
//!
//! This module defines the success envelopes, the error body, and the
//! mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{AttendanceReportRow, SlaReport};
use crate::error::EngineError;
use crate::models::{AuditTrace, DailySummary, DerivedDuration, SlaResult};

/// Identifying fields shared by every successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationMeta {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
}

impl CalculationMeta {
    /// Stamps a new calculation.
    pub fn new(calculation_id: Uuid) -> Self {
        Self {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Response body for `POST /attendance/duration`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationResponse {
    /// Calculation identity.
    #[serde(flatten)]
    pub meta: CalculationMeta,
    /// The derived figures.
    pub duration: DerivedDuration,
    /// How the figures were reached.
    pub audit_trace: AuditTrace,
}

/// Response body for `POST /attendance/daily-summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummaryResponse {
    /// Calculation identity.
    #[serde(flatten)]
    pub meta: CalculationMeta,
    /// The day's figures.
    pub summary: DailySummary,
    /// How the figures were reached.
    pub audit_trace: AuditTrace,
}

/// Response body for `POST /attendance/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceReportResponse {
    /// Calculation identity.
    #[serde(flatten)]
    pub meta: CalculationMeta,
    /// One row per input record.
    pub rows: Vec<AttendanceReportRow>,
}

/// Response body for `POST /tickets/sla`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaResponse {
    /// Calculation identity.
    #[serde(flatten)]
    pub meta: CalculationMeta,
    /// Ticket the result belongs to.
    pub ticket_id: Option<String>,
    /// The SLA figures.
    pub sla: SlaResult,
    /// How the figures were reached.
    pub audit_trace: AuditTrace,
}

/// Response body for `POST /tickets/sla/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaBatchResponse {
    /// Calculation identity.
    #[serde(flatten)]
    pub meta: CalculationMeta,
    /// Per-row results and counts.
    pub report: SlaReport,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// The input field the error is attributed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
        }
    }

    /// Creates a validation error attributed to a field.
    pub fn validation_error(field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            code: "VALIDATION_ERROR".to_string(),
            message: message.into(),
            field: field.map(str::to_string),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        if error.is_validation() {
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(error.field(), error.to_string()),
            };
        }

        ApiErrorResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ApiError::new("CONFIG_ERROR", error.to_string()),
        }
    }
}
