//! HTTP request handlers for the SLA engine API.
//!
//! Handlers are thin: decode the body, read the clock once, call the
//! calculator, and wrap the result. Validation failures come back as HTTP
//! 400 with the offending field named.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    attendance_report, calculate_attendance, calculate_day, calculate_sla, sla_report,
};
use crate::error::EngineError;
use crate::models::{AuditTrace, TicketSlaInput};

use super::request::{
    AttendanceDurationRequest, AttendanceReportRequest, DailySummaryRequest, SlaBatchRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, AttendanceReportResponse, CalculationMeta, DailySummaryResponse,
    DurationResponse, SlaBatchResponse, SlaResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/duration", post(attendance_duration_handler))
        .route("/attendance/daily-summary", post(daily_summary_handler))
        .route("/attendance/report", post(attendance_report_handler))
        .route("/tickets/sla", post(sla_handler))
        .route("/tickets/sla/batch", post(sla_batch_handler))
        .with_state(state)
}

/// Handler for POST /attendance/duration.
async fn attendance_duration_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceDurationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance duration request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let now = resolve_clock(request.as_of);
    let start_time = Instant::now();
    let calculation = calculate_attendance(&request.record, now, state.config().workday(), 1);
    let duration_us = elapsed_us(start_time);

    info!(
        correlation_id = %correlation_id,
        record_id = request.record.id.as_deref().unwrap_or("-"),
        source = ?calculation.duration.source,
        effective_hours = %calculation.duration.effective_hours,
        overtime_hours = %calculation.duration.overtime_hours,
        duration_us,
        "Attendance duration computed"
    );

    json_ok(DurationResponse {
        meta: CalculationMeta::new(correlation_id),
        duration: calculation.duration,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us,
        },
    })
}

/// Handler for POST /attendance/daily-summary.
async fn daily_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<DailySummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing daily summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let workday = state.config().workday();
    let lunch_mode = request.lunch_mode.unwrap_or(workday.lunch_mode);
    let now = resolve_clock(request.as_of);

    let start_time = Instant::now();
    let calculation = calculate_day(request.date, &request.records, now, workday, lunch_mode);
    let duration_us = elapsed_us(start_time);

    info!(
        correlation_id = %correlation_id,
        date = %request.date,
        sessions = calculation.summary.sessions.len(),
        lunch_mode = ?lunch_mode,
        effective_hours = %calculation.summary.effective_hours,
        duration_us,
        "Daily summary computed"
    );

    json_ok(DailySummaryResponse {
        meta: CalculationMeta::new(correlation_id),
        summary: calculation.summary,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us,
        },
    })
}

/// Handler for POST /attendance/report.
async fn attendance_report_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let now = resolve_clock(request.as_of);
    let start_time = Instant::now();
    let rows = attendance_report(&request.records, now, state.config().workday());

    info!(
        correlation_id = %correlation_id,
        rows = rows.len(),
        duration_us = elapsed_us(start_time),
        "Attendance report computed"
    );

    json_ok(AttendanceReportResponse {
        meta: CalculationMeta::new(correlation_id),
        rows,
    })
}

/// Handler for POST /tickets/sla.
///
/// Returns 400 when the ticket fails validation; the caller must then reject
/// the whole update.
async fn sla_handler(
    State(state): State<AppState>,
    payload: Result<Json<TicketSlaInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing ticket SLA request");

    let input = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match calculate_sla(&input, state.config().sla(), 1) {
        Ok(calculation) => {
            let duration_us = elapsed_us(start_time);
            info!(
                correlation_id = %correlation_id,
                ticket_id = input.ticket_id.as_deref().unwrap_or("-"),
                sla_status = ?calculation.result.sla_status,
                duration_us,
                "Ticket SLA computed"
            );
            json_ok(SlaResponse {
                meta: CalculationMeta::new(correlation_id),
                ticket_id: input.ticket_id,
                sla: calculation.result,
                audit_trace: AuditTrace {
                    steps: calculation.audit_steps,
                    warnings: calculation.warnings,
                    duration_us,
                },
            })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                ticket_id = input.ticket_id.as_deref().unwrap_or("-"),
                error = %err,
                "Ticket SLA rejected"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /tickets/sla/batch.
///
/// Rejected rows are reported inside the body; the request itself succeeds.
async fn sla_batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<SlaBatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing ticket SLA batch request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let report = sla_report(&request.tickets, state.config().sla());

    info!(
        correlation_id = %correlation_id,
        rows = report.rows.len(),
        rejected = report.rejected,
        duration_us = elapsed_us(start_time),
        "Ticket SLA batch computed"
    );

    json_ok(SlaBatchResponse {
        meta: CalculationMeta::new(correlation_id),
        report,
    })
}

/// Reads the wall clock once per request unless the caller pinned it.
fn resolve_clock(as_of: Option<NaiveDateTime>) -> NaiveDateTime {
    as_of.unwrap_or_else(|| Local::now().naive_local())
}

fn elapsed_us(start_time: Instant) -> u64 {
    u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

fn error_response(err: EngineError) -> Response {
    ApiErrorResponse::from(err).into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}
