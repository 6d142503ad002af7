//! HTTP request handlers for the attendance and payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::TimeWindowRules;
use crate::error::EngineError;
use crate::models::{AttendanceRecord, AttendanceSummary, EventOutcome, MonthlySalaryRecord, PayMonth, PresenceSnapshot};

use super::request::{AttendanceReportQuery, DateQuery, DateRangeQuery, EventRequest, MonthQuery};
use super::response::{ApiError, ApiErrorResponse, HealthResponse, SalaryReportResponse};
use super::state::AppState;

type ApiResult<T> = Result<Json<T>, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/rules", get(get_rules_handler))
        .route("/rules", put(put_rules_handler))
        .route("/events", post(record_event_handler))
        .route("/scan", post(scan_handler))
        .route("/salaries", get(salary_report_handler))
        .route("/salaries/:employee_id", get(employee_salary_handler))
        .route("/attendance", get(attendance_report_handler))
        .route("/attendance/present", get(present_employees_handler))
        .route("/attendance/:employee_id/summary", get(attendance_summary_handler))
        .route("/attendance/:employee_id/late", get(late_check_ins_handler))
        .with_state(state)
}

/// Logs an engine failure and converts it to an HTTP error.
fn engine_error(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        code = error.code(),
        error = %error,
        "Request failed"
    );
    error.into()
}

/// Maps a JSON body rejection to a 400 with a specific error code.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
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
                ApiError::validation_error(body_text)
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
    ApiErrorResponse::bad_request(error)
}

/// Maps a query string rejection to a 400 validation error.
fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Invalid query string"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

fn parse_month(correlation_id: Uuid, value: &str) -> Result<PayMonth, ApiErrorResponse> {
    value
        .parse::<PayMonth>()
        .map_err(|err| engine_error(correlation_id, err))
}

/// Maps a processed event to its response; rejections become 409s.
fn event_response(
    correlation_id: Uuid,
    outcome: Result<EventOutcome, EngineError>,
) -> Result<(StatusCode, Json<EventOutcome>), ApiErrorResponse> {
    let outcome = outcome
        .and_then(EventOutcome::into_result)
        .map_err(|err| engine_error(correlation_id, err))?;

    let status = match outcome {
        EventOutcome::CheckedIn { .. } => StatusCode::CREATED,
        _ => StatusCode::OK,
    };
    if let Some(record) = outcome.record() {
        info!(
            correlation_id = %correlation_id,
            employee_id = %record.employee_id,
            date = %record.date,
            "Attendance event recorded"
        );
    }
    Ok((status, Json(outcome)))
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let service = state.service();
    Json(HealthResponse {
        status: "ok".to_string(),
        organization: service.config().organization().name.clone(),
        rules_configured: matches!(service.current_rules(), Ok(Some(_))),
    })
}

/// Handler for GET /rules.
async fn get_rules_handler(State(state): State<AppState>) -> ApiResult<TimeWindowRules> {
    let correlation_id = Uuid::new_v4();
    let rules = state
        .service()
        .current_rules()
        .and_then(|rules| {
            rules.ok_or_else(|| EngineError::MissingConfiguration {
                context: "rules lookup".to_string(),
            })
        })
        .map_err(|err| engine_error(correlation_id, err))?;
    Ok(Json(rules.as_ref().clone()))
}

/// Handler for PUT /rules.
///
/// Replaces the time window rules for every later event and salary.
async fn put_rules_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimeWindowRules>, JsonRejection>,
) -> ApiResult<TimeWindowRules> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Updating time window rules");

    let Json(rules) = payload.map_err(|rejection| json_rejection(correlation_id, rejection))?;
    let rules = state
        .service()
        .set_rules(rules)
        .map_err(|err| engine_error(correlation_id, err))?;
    Ok(Json(rules.as_ref().clone()))
}

/// Handler for POST /events.
///
/// Records a scan that was already matched to an employee.
async fn record_event_handler(
    State(state): State<AppState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EventOutcome>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance event");

    let Json(request) = payload.map_err(|rejection| json_rejection(correlation_id, rejection))?;
    let outcome = state
        .service()
        .record_event(&request.employee_id, request.timestamp);
    event_response(correlation_id, outcome)
}

/// Handler for POST /scan.
///
/// Takes one scan from the configured matcher and records it at the
/// current time. The matcher blocks while it waits for a finger, so the
/// scan runs on the blocking pool.
async fn scan_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<EventOutcome>), ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing fingerprint scan");

    let outcome = tokio::task::spawn_blocking(move || {
        state.service().scan_and_record(state.matcher(), Utc::now())
    })
    .await
    .unwrap_or_else(|err| {
        Err(EngineError::ScannerUnavailable {
            message: format!("scan task failed: {}", err),
        })
    });
    event_response(correlation_id, outcome)
}

/// Handler for GET /salaries?month=YYYY-MM.
async fn salary_report_handler(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<SalaryReportResponse> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;
    let month = parse_month(correlation_id, &query.month)?;

    let start_time = Instant::now();
    let report = SalaryReportResponse::new(month, state.service().all_monthly_salaries(month));
    info!(
        correlation_id = %correlation_id,
        month = %month,
        succeeded = report.succeeded,
        failed = report.failed,
        duration_us = start_time.elapsed().as_micros(),
        "Salary report completed"
    );
    Ok(Json(report))
}

/// Handler for GET /salaries/{employee_id}?month=YYYY-MM.
async fn employee_salary_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<MonthlySalaryRecord> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;
    let month = parse_month(correlation_id, &query.month)?;

    let record = state
        .service()
        .monthly_salary(&employee_id, month)
        .map_err(|err| engine_error(correlation_id, err))?;
    Ok(Json(record))
}

/// Handler for GET /attendance/{employee_id}/summary.
async fn attendance_summary_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> ApiResult<AttendanceSummary> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;

    let summary = state
        .service()
        .attendance_summary(&employee_id, query.start_date, query.end_date)
        .map_err(|err| engine_error(correlation_id, err))?;
    Ok(Json(summary))
}

/// Handler for GET /attendance/{employee_id}/late?month=YYYY-MM.
async fn late_check_ins_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;
    let month = parse_month(correlation_id, &query.month)?;

    let records = state
        .service()
        .late_check_ins(&employee_id, month)
        .map_err(|err| engine_error(correlation_id, err))?;
    Ok(Json(records))
}

/// Handler for GET /attendance.
async fn attendance_report_handler(
    State(state): State<AppState>,
    query: Result<Query<AttendanceReportQuery>, QueryRejection>,
) -> ApiResult<Vec<AttendanceRecord>> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;

    let records = state
        .service()
        .attendance_report(query.start_date, query.end_date, query.employee_id.as_deref())
        .map_err(|err| engine_error(correlation_id, err))?;
    Ok(Json(records))
}

/// Handler for GET /attendance/present?date=YYYY-MM-DD.
async fn present_employees_handler(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<PresenceSnapshot> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_rejection(correlation_id, rejection))?;

    let snapshot = state
        .service()
        .present_employees(query.date)
        .map_err(|err| engine_error(correlation_id, err))?;
    Ok(Json(snapshot))
}
