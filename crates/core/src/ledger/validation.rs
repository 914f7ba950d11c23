//! Business rule validation for accounting entries.

use rust_decimal::Decimal;
use thiserror::Error;

use partida_shared::types::{MAX_SCALE, is_valid_scale};

/// Validation errors for entry creation.
#[derive(Debug, Error)]
pub enum LedgerValidationError {
    /// Entry debits and credits do not balance.
    #[error("Entry is unbalanced: debits ({debit_total}) != credits ({credit_total})")]
    Unbalanced {
        /// Total debit amount.
        debit_total: Decimal,
        /// Total credit amount.
        credit_total: Decimal,
    },

    /// Entry has no lines. A balanced-but-empty entry (0 == 0) is not a
    /// valid accounting entry.
    #[error("Entry must have at least one line")]
    NoLines,

    /// A line has a negative debit or credit amount.
    #[error("Line amounts must not be negative")]
    NegativeAmount,

    /// A line amount carries more than [`MAX_SCALE`] decimal places.
    #[error("Line amounts must have at most {MAX_SCALE} decimal places")]
    ExcessPrecision,
}

/// Debit and credit amounts of a single entry line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineAmounts {
    /// Debit amount (debe), non-negative.
    pub debit: Decimal,
    /// Credit amount (haber), non-negative.
    pub credit: Decimal,
}

/// Sums the debit and credit columns of an entry.
///
/// Exact decimal arithmetic; no rounding happens before comparison.
#[must_use]
pub fn entry_totals(lines: &[LineAmounts]) -> (Decimal, Decimal) {
    let mut debit_total = Decimal::ZERO;
    let mut credit_total = Decimal::ZERO;

    for line in lines {
        debit_total += line.debit;
        credit_total += line.credit;
    }

    (debit_total, credit_total)
}

/// Validates the line items of a proposed accounting entry.
///
/// The entry is accepted iff it has at least one line, every amount is
/// non-negative with scale <= 2, and the debit and credit totals are
/// exactly equal. A line may carry both a debit and a credit, or neither;
/// only the entry-level balance law is enforced.
///
/// # Errors
///
/// Returns an error describing the first violated rule.
pub fn validate_lines(lines: &[LineAmounts]) -> Result<(), LedgerValidationError> {
    if lines.is_empty() {
        return Err(LedgerValidationError::NoLines);
    }

    for line in lines {
        if line.debit.is_sign_negative() || line.credit.is_sign_negative() {
            return Err(LedgerValidationError::NegativeAmount);
        }
        if !is_valid_scale(line.debit) || !is_valid_scale(line.credit) {
            return Err(LedgerValidationError::ExcessPrecision);
        }
    }

    let (debit_total, credit_total) = entry_totals(lines);

    if debit_total != credit_total {
        return Err(LedgerValidationError::Unbalanced {
            debit_total,
            credit_total,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn line(debit: Decimal, credit: Decimal) -> LineAmounts {
        LineAmounts { debit, credit }
    }

    #[test]
    fn test_balanced_lines() {
        let lines = vec![line(dec!(100.00), dec!(0)), line(dec!(0), dec!(100.00))];
        assert!(validate_lines(&lines).is_ok());
    }

    #[test]
    fn test_balanced_many_lines() {
        let lines = vec![
            line(dec!(60.50), dec!(0)),
            line(dec!(39.50), dec!(0)),
            line(dec!(0), dec!(70.00)),
            line(dec!(0), dec!(30.00)),
        ];
        assert!(validate_lines(&lines).is_ok());
    }

    #[test]
    fn test_unbalanced_lines_carry_totals() {
        let lines = vec![line(dec!(100.00), dec!(0)), line(dec!(0), dec!(50.00))];
        match validate_lines(&lines) {
            Err(LedgerValidationError::Unbalanced {
                debit_total,
                credit_total,
            }) => {
                assert_eq!(debit_total, dec!(100.00));
                assert_eq!(credit_total, dec!(50.00));
            }
            other => panic!("expected Unbalanced, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_lines_rejected_as_validation_not_imbalance() {
        let lines: Vec<LineAmounts> = vec![];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerValidationError::NoLines)
        ));
    }

    #[test]
    fn test_negative_debit_rejected() {
        let lines = vec![line(dec!(-10.00), dec!(0)), line(dec!(0), dec!(-10.00))];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerValidationError::NegativeAmount)
        ));
    }

    #[test]
    fn test_excess_precision_rejected() {
        let lines = vec![line(dec!(10.001), dec!(0)), line(dec!(0), dec!(10.001))];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerValidationError::ExcessPrecision)
        ));
    }

    #[test]
    fn test_single_sided_balanced_line_is_allowed() {
        // The data model does not force one-sided lines; a line carrying
        // both sides is legal as long as the entry balances.
        let lines = vec![line(dec!(25.00), dec!(25.00))];
        assert!(validate_lines(&lines).is_ok());
    }

    #[test]
    fn test_zero_amount_lines_are_allowed() {
        let lines = vec![line(dec!(0), dec!(0)), line(dec!(5), dec!(5))];
        assert!(validate_lines(&lines).is_ok());
    }

    #[test]
    fn test_exact_decimal_comparison_no_rounding() {
        // 0.10 + 0.20 must equal 0.30 exactly; floats would drift here.
        let lines = vec![
            line(dec!(0.10), dec!(0)),
            line(dec!(0.20), dec!(0)),
            line(dec!(0), dec!(0.30)),
        ];
        assert!(validate_lines(&lines).is_ok());
    }

    // ========================================================================
    // Property tests for the balance law
    // ========================================================================

    /// Strategy for non-negative scale-2 amounts.
    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Mirrored debit/credit lines always validate.
        #[test]
        fn prop_mirrored_lines_balance(amounts in prop::collection::vec(amount_strategy(), 1..10)) {
            let mut lines = Vec::new();
            for amount in &amounts {
                lines.push(LineAmounts { debit: *amount, credit: Decimal::ZERO });
                lines.push(LineAmounts { debit: Decimal::ZERO, credit: *amount });
            }
            prop_assert!(validate_lines(&lines).is_ok());
        }

        /// Adding a one-sided non-zero line to a balanced entry always
        /// breaks the balance, and the reported totals reflect the skew.
        #[test]
        fn prop_skewed_entry_rejected(
            amount in amount_strategy(),
            skew in amount_strategy(),
        ) {
            prop_assume!(skew > Decimal::ZERO);

            let lines = vec![
                LineAmounts { debit: amount, credit: Decimal::ZERO },
                LineAmounts { debit: Decimal::ZERO, credit: amount },
                LineAmounts { debit: skew, credit: Decimal::ZERO },
            ];

            match validate_lines(&lines) {
                Err(LedgerValidationError::Unbalanced { debit_total, credit_total }) => {
                    prop_assert_eq!(debit_total - credit_total, skew);
                }
                other => prop_assert!(false, "expected Unbalanced, got {:?}", other),
            }
        }

        /// Totals are exact sums of the input columns.
        #[test]
        fn prop_totals_are_column_sums(
            debits in prop::collection::vec(amount_strategy(), 0..10),
            credits in prop::collection::vec(amount_strategy(), 0..10),
        ) {
            let mut lines: Vec<LineAmounts> = debits
                .iter()
                .map(|d| LineAmounts { debit: *d, credit: Decimal::ZERO })
                .collect();
            lines.extend(
                credits
                    .iter()
                    .map(|c| LineAmounts { debit: Decimal::ZERO, credit: *c }),
            );

            let (debit_total, credit_total) = entry_totals(&lines);
            prop_assert_eq!(debit_total, debits.iter().sum::<Decimal>());
            prop_assert_eq!(credit_total, credits.iter().sum::<Decimal>());
        }
    }
}
