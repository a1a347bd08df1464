//! Decimal helpers shared by the PPh 21 calculations.
//!
//! All monetary math runs on [`Decimal`]; these wrap the few operations the
//! rules need beyond plain arithmetic.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// PKP is rounded down to a multiple of this amount.
pub const PKP_ROUNDING_UNIT: Decimal = dec!(1000);

/// Months in a tax year, as a decimal divisor.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Floors a value to the nearest lower multiple of 1,000.
///
/// Never rounds up, including for negative values (which floor away from
/// zero).
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::round_down_to_thousand;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_down_to_thousand(dec!(59999999.99)), dec!(59999000));
/// assert_eq!(round_down_to_thousand(dec!(60000000)), dec!(60000000));
/// ```
pub fn round_down_to_thousand(value: Decimal) -> Decimal {
    (value / PKP_ROUNDING_UNIT)
        .round_dp_with_strategy(0, RoundingStrategy::ToNegativeInfinity)
        * PKP_ROUNDING_UNIT
}

/// Returns the smaller of two values.
pub fn min(a: Decimal, b: Decimal) -> Decimal {
    a.min(b)
}

/// Returns the larger of two values.
pub fn max(a: Decimal, b: Decimal) -> Decimal {
    a.max(b)
}

/// Expresses `part` as a percentage of `whole`, or 0 when `whole` is 0.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::percentage_of;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(percentage_of(dec!(4000000), dec!(120000000)).round_dp(4), dec!(3.3333));
/// assert_eq!(percentage_of(dec!(100), dec!(0)), dec!(0));
/// ```
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// Divides an annual figure into a monthly one.
pub fn per_month(annual: Decimal) -> Decimal {
    annual / MONTHS_PER_YEAR
}
