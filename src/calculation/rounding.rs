//! Fixed-point rounding shared by the hour and currency calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Milliseconds in one hour.
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Zero hours at scale 2, serialized as `"0.00"` like every computed hour value.
pub const ZERO_HOURS: Decimal = Decimal::from_parts(0, 0, 0, false, 2);

/// Rounds to 2 decimal places, half away from zero, and pads to scale 2.
///
/// # Examples
///
/// ```
/// use attendance_payroll::calculation::round_2dp;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_2dp(Decimal::from_str("0.125").unwrap()).to_string(), "0.13");
/// assert_eq!(round_2dp(Decimal::from_str("0.5").unwrap()).to_string(), "0.50");
/// ```
pub fn round_2dp(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Converts a millisecond count to fractional hours rounded to 2 dp.
pub fn hours_from_millis(millis: i64) -> Decimal {
    round_2dp(Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR))
}
