//! Monthly aggregation of attendance durations.

use crate::models::{AttendanceRecord, MonthTotals, PayMonth};

/// Sums one employee's derived hours over a calendar month.
///
/// Records for other employees or other months are ignored. Days without a
/// check-out contribute nothing. The result does not depend on the order of
/// `records`.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::aggregate_month;
/// use attendance_payroll::models::{AttendanceRecord, PayMonth};
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// let mut record = AttendanceRecord::checked_in(
///     "EMP0001",
///     DateTime::parse_from_rfc3339("2026-01-15T09:30:00+00:00").unwrap(),
/// );
/// record.check_out = Some(DateTime::parse_from_rfc3339("2026-01-15T17:00:00+00:00").unwrap());
/// record.late_hours = Decimal::new(50, 2);
///
/// let month: PayMonth = "2026-01".parse().unwrap();
/// let totals = aggregate_month(&[record], "EMP0001", month);
/// assert_eq!(totals.total_late_hours, Decimal::new(50, 2));
/// ```
pub fn aggregate_month(
    records: &[AttendanceRecord],
    employee_id: &str,
    month: PayMonth,
) -> MonthTotals {
    records
        .iter()
        .filter(|r| r.employee_id == employee_id && month.contains_date(r.date))
        .filter(|r| r.is_complete())
        .fold(MonthTotals::default(), |totals, r| MonthTotals {
            total_late_hours: totals.total_late_hours + r.late_hours,
            total_early_leave_hours: totals.total_early_leave_hours + r.early_leave_hours,
            total_overtime_hours: totals.total_overtime_hours + r.overtime_hours,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn record(employee_id: &str, date: &str, late: &str, early: &str, overtime: &str) -> AttendanceRecord {
        let mut record =
            AttendanceRecord::checked_in(employee_id, ts(&format!("{}T09:00:00+00:00", date)));
        record.check_out = Some(ts(&format!("{}T17:00:00+00:00", date)));
        record.late_hours = dec(late);
        record.early_leave_hours = dec(early);
        record.overtime_hours = dec(overtime);
        record
    }

    fn january() -> PayMonth {
        "2026-01".parse().unwrap()
    }

    /// AGG-001: sums each field independently
    #[test]
    fn test_agg_001_sums_fields() {
        let records = vec![
            record("EMP0001", "2026-01-05", "0.50", "0", "1.00"),
            record("EMP0001", "2026-01-06", "0.25", "1.50", "0"),
            record("EMP0001", "2026-01-07", "0", "0", "2.25"),
        ];

        let totals = aggregate_month(&records, "EMP0001", january());
        assert_eq!(totals.total_late_hours, dec("0.75"));
        assert_eq!(totals.total_early_leave_hours, dec("1.50"));
        assert_eq!(totals.total_overtime_hours, dec("3.25"));
    }

    /// AGG-002: incomplete days contribute zero
    #[test]
    fn test_agg_002_incomplete_day_contributes_zero() {
        let mut open = AttendanceRecord::checked_in("EMP0001", ts("2026-01-08T11:00:00+00:00"));
        // Even a stale value on an open day is ignored
        open.late_hours = dec("2.00");
        let records = vec![record("EMP0001", "2026-01-05", "0.50", "0", "0"), open];

        let totals = aggregate_month(&records, "EMP0001", january());
        assert_eq!(totals.total_late_hours, dec("0.50"));
    }

    /// AGG-003: other months and employees are excluded
    #[test]
    fn test_agg_003_filters_month_and_employee() {
        let records = vec![
            record("EMP0001", "2026-01-31", "1.00", "0", "0"),
            record("EMP0001", "2026-02-01", "2.00", "0", "0"),
            record("EMP0001", "2025-01-15", "4.00", "0", "0"),
            record("EMP0002", "2026-01-15", "8.00", "0", "0"),
        ];

        let totals = aggregate_month(&records, "EMP0001", january());
        assert_eq!(totals.total_late_hours, dec("1.00"));
    }

    /// AGG-004: empty month
    #[test]
    fn test_agg_004_no_records() {
        let totals = aggregate_month(&[], "EMP0001", january());
        assert_eq!(totals, MonthTotals::default());
    }

    #[test]
    fn test_order_independent() {
        let mut records = vec![
            record("EMP0001", "2026-01-05", "0.33", "0", "1.17"),
            record("EMP0001", "2026-01-06", "0.17", "0.83", "0"),
            record("EMP0001", "2026-01-07", "1.01", "0", "0.01"),
        ];
        let forward = aggregate_month(&records, "EMP0001", january());
        records.reverse();
        let backward = aggregate_month(&records, "EMP0001", january());
        assert_eq!(forward, backward);
    }
}
