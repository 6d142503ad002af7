//! Attendance event outcomes.
//!
//! Every matched scan ends in exactly one [`EventOutcome`]. Ordinary business
//! rejections are values, not errors, so callers must handle each case.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AttendanceRecord;
use crate::error::EngineError;

/// Why a scan was rejected. No state is mutated for a rejected scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The day already has both a check-in and a check-out.
    AlreadyCheckedOut,
    /// The scan was not strictly later than the day's check-in.
    CheckOutNotAfterCheckIn,
    /// The scan repeats the check-in read: same wall-clock second, or less
    /// than a second after it.
    DuplicateScan,
}

/// A rejected scan, with the context needed to report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// The employee that scanned.
    pub employee_id: String,
    /// The organizational calendar date of the scan.
    pub date: NaiveDate,
    /// Why the scan was rejected.
    pub reason: RejectionReason,
}

impl From<Rejection> for EngineError {
    fn from(rejection: Rejection) -> Self {
        match rejection.reason {
            RejectionReason::AlreadyCheckedOut => EngineError::AlreadyCheckedOut {
                employee_id: rejection.employee_id,
                date: rejection.date,
            },
            RejectionReason::CheckOutNotAfterCheckIn => EngineError::CheckOutNotAfterCheckIn {
                employee_id: rejection.employee_id,
                date: rejection.date,
            },
            RejectionReason::DuplicateScan => EngineError::DuplicateScan {
                employee_id: rejection.employee_id,
                date: rejection.date,
            },
        }
    }
}

/// The result of processing one attendance event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EventOutcome {
    /// A new record was opened for the day.
    CheckedIn {
        /// The new record.
        record: AttendanceRecord,
    },
    /// The day's record was completed and its durations computed.
    CheckedOut {
        /// The completed record.
        record: AttendanceRecord,
    },
    /// The scan was rejected without mutation.
    Rejected {
        /// Why.
        rejection: Rejection,
    },
}

impl EventOutcome {
    /// The record created or completed by this event, if any.
    pub fn record(&self) -> Option<&AttendanceRecord> {
        match self {
            EventOutcome::CheckedIn { record } | EventOutcome::CheckedOut { record } => {
                Some(record)
            }
            EventOutcome::Rejected { .. } => None,
        }
    }

    /// Converts a rejection into an error, passing other outcomes through.
    pub fn into_result(self) -> Result<Self, EngineError> {
        match self {
            EventOutcome::Rejected { rejection } => Err(rejection.into()),
            other => Ok(other),
        }
    }
}
