//! Attendance event processing.
//!
//! [`AttendanceEventProcessor`] turns one matched scan into a check-in, a
//! check-out or a rejection. The first scan of a day opens the record, the
//! second completes it and computes its durations, and any later scan is
//! rejected without touching the stored record. A repeat read of the finger
//! in the check-in's wall-clock second, or under a second after it, is a
//! duplicate and never closes the day.
//!
//! The read-branch-write for one (employee, date) runs inside a single
//! [`AttendanceStore::update_day`] call, so two near-simultaneous scans for
//! the same employee cannot both create a record or both check out.

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, SubsecRound, TimeZone};
use tracing::{debug, info, warn};

use crate::calculation::compute_durations;
use crate::config::TimeWindowRules;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, EventOutcome, Rejection, RejectionReason};
use crate::store::AttendanceStore;

/// Applies scans to the attendance store.
#[derive(Debug)]
pub struct AttendanceEventProcessor<S> {
    store: Arc<S>,
    timezone: FixedOffset,
}

impl<S> Clone for AttendanceEventProcessor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            timezone: self.timezone,
        }
    }
}

impl<S: AttendanceStore> AttendanceEventProcessor<S> {
    /// Creates a processor that dates events in `timezone`.
    pub fn new(store: Arc<S>, timezone: FixedOffset) -> Self {
        Self { store, timezone }
    }

    /// The organizational timezone events are dated in.
    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    /// Records one scan for `employee_id` at `timestamp`.
    ///
    /// The timestamp is converted to the organizational timezone first; its
    /// local date selects the record.
    ///
    /// - No record for the date: a record is opened with only a check-in.
    /// - Record with a check-in only: the check-out is set and durations are
    ///   computed, provided `timestamp` is strictly after the check-in and
    ///   not a duplicate read of it.
    /// - Record already checked out: rejected with `AlreadyCheckedOut`.
    ///
    /// Rejections are returned as [`EventOutcome::Rejected`] and leave the
    /// store unchanged. `Err` is reserved for storage failures.
    pub fn process<Tz: TimeZone>(
        &self,
        employee_id: &str,
        timestamp: DateTime<Tz>,
        rules: &TimeWindowRules,
    ) -> EngineResult<EventOutcome> {
        let local = timestamp.with_timezone(&self.timezone);
        let date = local.date_naive();
        debug!(employee_id, %date, timestamp = %local, "Processing attendance event");

        let outcome = self.store.update_day(employee_id, date, |slot| {
            apply_scan(slot, employee_id, local, rules)
        })?;

        match &outcome {
            EventOutcome::CheckedIn { record } => {
                info!(employee_id, %date, check_in = ?record.check_in, "Checked in");
            }
            EventOutcome::CheckedOut { record } => {
                info!(
                    employee_id,
                    %date,
                    late_hours = %record.late_hours,
                    early_leave_hours = %record.early_leave_hours,
                    overtime_hours = %record.overtime_hours,
                    "Checked out"
                );
            }
            EventOutcome::Rejected { rejection } => {
                warn!(employee_id, %date, reason = ?rejection.reason, "Scan rejected");
            }
        }

        Ok(outcome)
    }
}

/// True when `at` repeats the `check_in` read rather than closing the day.
fn is_duplicate_read(check_in: DateTime<FixedOffset>, at: DateTime<FixedOffset>) -> bool {
    at.trunc_subsecs(0) == check_in.trunc_subsecs(0) || at - check_in < Duration::seconds(1)
}

/// The read-branch-write step, run while the day's slot is locked.
fn apply_scan(
    slot: &mut Option<AttendanceRecord>,
    employee_id: &str,
    at: DateTime<FixedOffset>,
    rules: &TimeWindowRules,
) -> EventOutcome {
    let reject = |reason| EventOutcome::Rejected {
        rejection: Rejection {
            employee_id: employee_id.to_string(),
            date: at.date_naive(),
            reason,
        },
    };

    match slot {
        Some(existing) if existing.check_out.is_some() => {
            reject(RejectionReason::AlreadyCheckedOut)
        }
        Some(existing) if existing.check_in.is_some_and(|check_in| at <= check_in) => {
            reject(RejectionReason::CheckOutNotAfterCheckIn)
        }
        Some(existing)
            if existing
                .check_in
                .is_some_and(|check_in| is_duplicate_read(check_in, at)) =>
        {
            reject(RejectionReason::DuplicateScan)
        }
        Some(existing) if existing.check_in.is_some() => {
            existing.check_out = Some(at);
            *existing = compute_durations(existing, rules);
            EventOutcome::CheckedOut {
                record: existing.clone(),
            }
        }
        _ => {
            let record = AttendanceRecord::checked_in(employee_id, at);
            *slot = Some(record.clone());
            EventOutcome::CheckedIn { record }
        }
    }
}
