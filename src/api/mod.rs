//! HTTP API module for the attendance and payroll engine.
//!
//! This module provides the REST endpoints for recording attendance scans
//! and reading salary and attendance reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AttendanceReportQuery, DateQuery, DateRangeQuery, EventRequest, MonthQuery};
pub use response::{ApiError, ApiErrorResponse, HealthResponse, SalaryReportResponse};
pub use state::AppState;
