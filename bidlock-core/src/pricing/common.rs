//! Shared helpers for money handling.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero, per standard
/// financial conventions. The pricing engine itself returns exact values;
/// rounding belongs at presentation and export boundaries only.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use bidlock_core::pricing::round_half_up;
///
/// assert_eq!(round_half_up(dec!(36.004)), dec!(36.00));
/// assert_eq!(round_half_up(dec!(36.005)), dec!(36.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
