//! Monetary amount helpers with fixed decimal scale.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All debit/credit/balance arithmetic goes through `rust_decimal::Decimal`;
//! conversion to floating point happens only at serialization boundaries.

use rust_decimal::Decimal;

/// Maximum number of fractional digits for persisted amounts.
pub const MAX_SCALE: u32 = 2;

/// Returns true if the amount carries at most [`MAX_SCALE`] fractional digits.
///
/// The check is value-based: trailing zeros do not count as precision, so
/// `1.500` is accepted while `1.005` is not.
#[must_use]
pub fn is_valid_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= MAX_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(100))]
    #[case(dec!(0.5))]
    #[case(dec!(19.99))]
    #[case(dec!(-3.25))]
    #[case(dec!(1.500))]
    fn test_valid_scale(#[case] amount: Decimal) {
        assert!(is_valid_scale(amount));
    }

    #[rstest]
    #[case(dec!(0.001))]
    #[case(dec!(1.005))]
    #[case(dec!(-0.999))]
    fn test_invalid_scale(#[case] amount: Decimal) {
        assert!(!is_valid_scale(amount));
    }
}
