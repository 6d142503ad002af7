//! Response types for the attendance and payroll API.
//!
//! This module defines the success bodies that are not plain domain models,
//! the error response structure, and the mapping from [`EngineError`] to
//! HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{PayMonth, SalaryReportEntry};

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server is serving.
    pub status: String,
    /// The configured organization.
    pub organization: String,
    /// Whether time window rules are configured.
    pub rules_configured: bool,
}

/// Body of `GET /salaries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryReportResponse {
    /// The month reported.
    pub month: PayMonth,
    /// Employees whose salary was computed.
    pub succeeded: usize,
    /// Employees whose salary could not be computed.
    pub failed: usize,
    /// One entry per active employee.
    pub employees: Vec<SalaryReportEntry>,
}

impl SalaryReportResponse {
    /// Builds the response, counting successes and failures.
    pub fn new(month: PayMonth, employees: Vec<SalaryReportEntry>) -> Self {
        let succeeded = employees.iter().filter(|e| e.is_success()).count();
        Self {
            month,
            succeeded,
            failed: employees.len() - succeeded,
            employees,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let code = error.code();
        let message = error.to_string();
        let (status, details) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some("The server configuration must be fixed by an administrator"),
            ),
            EngineError::MissingConfiguration { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                Some("Time window rules must be configured before this operation can run"),
            ),
            EngineError::InvalidRules { .. }
            | EngineError::InvalidEmployee { .. }
            | EngineError::InvalidDateRange { .. }
            | EngineError::InvalidMonth { .. } => (StatusCode::BAD_REQUEST, None),
            EngineError::EmployeeNotFound { .. } | EngineError::NoMatch => {
                (StatusCode::NOT_FOUND, None)
            }
            EngineError::AlreadyCheckedOut { .. } => (
                StatusCode::CONFLICT,
                Some("The day already has a check-in and a check-out"),
            ),
            EngineError::CheckOutNotAfterCheckIn { .. } => (
                StatusCode::CONFLICT,
                Some("A check-out must be later than the day's check-in"),
            ),
            EngineError::DuplicateScan { .. } => (
                StatusCode::CONFLICT,
                Some("The scan repeats the day's check-in read"),
            ),
            EngineError::ScannerUnavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, None),
            EngineError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let error = match details {
            Some(details) => ApiError::with_details(code, message, details),
            None => ApiError::new(code, message),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_already_checked_out_is_conflict() {
        let engine_error = EngineError::AlreadyCheckedOut {
            employee_id: "EMP0001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        };
        let api_error: ApiErrorResponse = engine_error.into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "ALREADY_CHECKED_OUT");
        assert!(api_error.error.message.contains("EMP0001"));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                EngineError::MissingConfiguration {
                    context: "test".to_string(),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (EngineError::NoMatch, StatusCode::NOT_FOUND),
            (
                EngineError::EmployeeNotFound {
                    employee_id: "EMP0009".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                EngineError::InvalidMonth {
                    value: "2026-13".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                EngineError::InvalidRules {
                    field: "work_start".to_string(),
                    message: "must be before work_end".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                EngineError::DuplicateScan {
                    employee_id: "EMP0001".to_string(),
                    date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
                },
                StatusCode::CONFLICT,
            ),
            (
                EngineError::Storage {
                    message: "lock poisoned".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            let code = error.code();
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status, "status for {}", code);
            assert_eq!(response.error.code, code);
        }
    }
}
