//! Request types for the attendance and payroll API.
//!
//! This module defines the JSON body for `POST /events` and the query
//! strings accepted by the report endpoints.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Request body for `POST /events`.
///
/// A scan already matched to an employee, e.g. forwarded by a kiosk that
/// runs its own matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    /// The matched employee.
    pub employee_id: String,
    /// When the scan happened, with its UTC offset.
    pub timestamp: DateTime<FixedOffset>,
}

/// `?month=YYYY-MM`.
///
/// The month is kept as text so a malformed value is reported as
/// `INVALID_MONTH` rather than a generic query error.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthQuery {
    /// The salary month.
    pub month: String,
}

/// `?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`.
#[derive(Debug, Clone, Deserialize)]
pub struct DateRangeQuery {
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
}

/// Query for `GET /attendance`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceReportQuery {
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Restricts the report to one employee.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// `?date=YYYY-MM-DD`.
#[derive(Debug, Clone, Deserialize)]
pub struct DateQuery {
    /// The day inspected.
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_request_keeps_offset() {
        let json = r#"{"employee_id":"EMP0001","timestamp":"2026-01-15T09:30:00+05:30"}"#;
        let request: EventRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, "EMP0001");
        assert_eq!(request.timestamp.offset().local_minus_utc(), 330 * 60);
    }

    #[test]
    fn test_event_request_requires_timestamp() {
        let json = r#"{"employee_id":"EMP0001"}"#;
        let result: Result<EventRequest, _> = serde_json::from_str(json);
        assert!(result.unwrap_err().to_string().contains("missing field"));
    }
}
