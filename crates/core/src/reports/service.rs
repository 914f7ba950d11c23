//! Report computation over account movements.

use rust_decimal::Decimal;

use super::types::{
    AccountGrouping, AccountLedger, AccountPosition, CategoryGroup, FinancialPosition, LedgerLine,
    Movement, SubcategoryGroup,
};

/// Computes the general ledger section for one account.
///
/// The balance starts at zero and every movement applies
/// `balance += debit - credit`. The debit-normal convention is applied
/// uniformly to every account regardless of its category; downstream
/// consumers depend on this sign. Each emitted line carries the balance
/// AFTER its movement; the final balance is the last running value, or
/// zero when the account has no movements.
///
/// `movements` must already be in (date ascending, entry number ascending)
/// order.
#[must_use]
pub fn running_balance(
    account_code: String,
    account_name: String,
    movements: &[Movement],
) -> AccountLedger {
    let mut balance = Decimal::ZERO;
    let mut lines = Vec::with_capacity(movements.len());

    for movement in movements {
        balance += movement.debit - movement.credit;
        lines.push(LedgerLine {
            date: movement.date,
            entry_number: movement.entry_number,
            debit: movement.debit,
            credit: movement.credit,
            balance,
        });
    }

    AccountLedger {
        account_code,
        account_name,
        movements: lines,
        final_balance: balance,
    }
}

/// Computes the net balance of an account: sum(debit) - sum(credit) over
/// all of its movements, as a single exact-decimal aggregate.
#[must_use]
pub fn net_balance(movements: &[Movement]) -> Decimal {
    let mut balance = Decimal::ZERO;
    for movement in movements {
        balance += movement.debit - movement.credit;
    }
    balance
}

/// Groups account net balances into the two-level financial position
/// hierarchy: category code -> subcategory code -> accounts.
///
/// Groups are created lazily the first time their code appears; accounts
/// land in their subcategory in the order they are iterated, so callers
/// control ordering by iterating the chart of accounts deterministically.
#[must_use]
pub fn group_positions(accounts: &[(AccountGrouping, Decimal)]) -> FinancialPosition {
    let mut report = FinancialPosition::new();

    for (grouping, balance) in accounts {
        let category = report
            .entry(grouping.category_code.clone())
            .or_insert_with(|| CategoryGroup {
                category: grouping.category_name.clone(),
                subcategories: std::collections::HashMap::new(),
            });

        let subcategory = category
            .subcategories
            .entry(grouping.subcategory_code.clone())
            .or_insert_with(|| SubcategoryGroup {
                subcategory: grouping.subcategory_name.clone(),
                accounts: Vec::new(),
            });

        subcategory.accounts.push(AccountPosition {
            code: grouping.code.clone(),
            name: grouping.name.clone(),
            balance: *balance,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).expect("valid date")
    }

    fn movement(day: u32, number: i32, debit: Decimal, credit: Decimal) -> Movement {
        Movement {
            date: date(day),
            entry_number: number,
            debit,
            credit,
        }
    }

    fn grouping(category: &str, subcategory: &str, code: &str) -> AccountGrouping {
        AccountGrouping {
            category_code: category.to_string(),
            category_name: match category {
                "1" => "ACTIVO".to_string(),
                "2" => "PASIVO".to_string(),
                other => other.to_string(),
            },
            subcategory_code: subcategory.to_string(),
            subcategory_name: format!("SUB {subcategory}"),
            code: code.to_string(),
            name: format!("Account {code}"),
        }
    }

    #[test]
    fn test_running_balance_spec_example() {
        // [(d1,100,0), (d2,0,40), (d3,30,0)] -> [100, 60, 90], final 90
        let movements = vec![
            movement(1, 1, dec!(100), dec!(0)),
            movement(2, 2, dec!(0), dec!(40)),
            movement(3, 3, dec!(30), dec!(0)),
        ];

        let ledger = running_balance("1.1.01".to_string(), "Caja".to_string(), &movements);

        let balances: Vec<Decimal> = ledger.movements.iter().map(|l| l.balance).collect();
        assert_eq!(balances, vec![dec!(100), dec!(60), dec!(90)]);
        assert_eq!(ledger.final_balance, dec!(90));
    }

    #[test]
    fn test_running_balance_no_movements() {
        let ledger = running_balance("1.1.01".to_string(), "Caja".to_string(), &[]);
        assert!(ledger.movements.is_empty());
        assert_eq!(ledger.final_balance, Decimal::ZERO);
    }

    #[test]
    fn test_running_balance_can_go_negative() {
        // Credit-normal accounts still use debit - credit; the balance is
        // simply negative.
        let movements = vec![movement(1, 1, dec!(0), dec!(250.75))];
        let ledger = running_balance("2.1.01".to_string(), "Proveedores".to_string(), &movements);
        assert_eq!(ledger.final_balance, dec!(-250.75));
    }

    #[test]
    fn test_net_balance() {
        let movements = vec![
            movement(1, 1, dec!(100.00), dec!(0)),
            movement(2, 2, dec!(0), dec!(40.00)),
            movement(3, 3, dec!(30.00), dec!(0)),
        ];
        assert_eq!(net_balance(&movements), dec!(90.00));
        assert_eq!(net_balance(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_group_positions_spec_example() {
        // Two accounts in category "1"/"ACTIVO" with net balances 100 and
        // -20 both appear under group "1" with exact values, independent of
        // other categories.
        let accounts = vec![
            (grouping("1", "1.1", "1.1.01"), dec!(100)),
            (grouping("2", "2.1", "2.1.01"), dec!(-300)),
            (grouping("1", "1.1", "1.1.02"), dec!(-20)),
        ];

        let report = group_positions(&accounts);

        let activo = report.get("1").expect("category 1 present");
        assert_eq!(activo.category, "ACTIVO");
        let sub = activo.subcategories.get("1.1").expect("subcategory 1.1");
        assert_eq!(sub.accounts.len(), 2);
        assert_eq!(sub.accounts[0].code, "1.1.01");
        assert_eq!(sub.accounts[0].balance, dec!(100));
        assert_eq!(sub.accounts[1].code, "1.1.02");
        assert_eq!(sub.accounts[1].balance, dec!(-20));

        let pasivo = report.get("2").expect("category 2 present");
        assert_eq!(pasivo.category, "PASIVO");
    }

    #[test]
    fn test_group_positions_lazy_group_creation() {
        let accounts = vec![(grouping("1", "1.2", "1.2.01"), dec!(5.50))];
        let report = group_positions(&accounts);

        assert_eq!(report.len(), 1);
        let category = report.get("1").unwrap();
        assert_eq!(category.subcategories.len(), 1);
        assert!(category.subcategories.contains_key("1.2"));
    }

    #[test]
    fn test_group_positions_preserves_insertion_order_within_subcategory() {
        let accounts = vec![
            (grouping("1", "1.1", "1.1.09"), dec!(1)),
            (grouping("1", "1.1", "1.1.01"), dec!(2)),
        ];
        let report = group_positions(&accounts);
        let sub = &report["1"].subcategories["1.1"];

        // Insertion order, not code order: callers iterate the chart.
        assert_eq!(sub.accounts[0].code, "1.1.09");
        assert_eq!(sub.accounts[1].code, "1.1.01");
    }

    // ========================================================================
    // Property tests
    // ========================================================================

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    fn movement_strategy() -> impl Strategy<Value = Movement> {
        (1u32..28, 1i32..1000, amount_strategy(), amount_strategy())
            .prop_map(|(day, number, debit, credit)| movement(day, number, debit, credit))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The final running balance always equals the net balance.
        #[test]
        fn prop_final_balance_equals_net_balance(
            movements in prop::collection::vec(movement_strategy(), 0..30),
        ) {
            let ledger = running_balance("X".to_string(), "X".to_string(), &movements);
            prop_assert_eq!(ledger.final_balance, net_balance(&movements));
        }

        /// Each running balance differs from the previous one by exactly
        /// debit - credit of its movement.
        #[test]
        fn prop_running_balance_steps(
            movements in prop::collection::vec(movement_strategy(), 1..30),
        ) {
            let ledger = running_balance("X".to_string(), "X".to_string(), &movements);

            let mut previous = Decimal::ZERO;
            for line in &ledger.movements {
                prop_assert_eq!(line.balance - previous, line.debit - line.credit);
                previous = line.balance;
            }
        }

        /// Grouping never loses an account: the total count across all
        /// subcategories equals the input count.
        #[test]
        fn prop_grouping_is_lossless(
            balances in prop::collection::vec(amount_strategy(), 0..20),
        ) {
            let accounts: Vec<(AccountGrouping, Decimal)> = balances
                .iter()
                .enumerate()
                .map(|(i, balance)| {
                    let category = format!("{}", i % 3 + 1);
                    let subcategory = format!("{category}.{}", i % 2 + 1);
                    let code = format!("{subcategory}.{i:02}");
                    (grouping(&category, &subcategory, &code), *balance)
                })
                .collect();

            let report = group_positions(&accounts);
            let grouped: usize = report
                .values()
                .flat_map(|c| c.subcategories.values())
                .map(|s| s.accounts.len())
                .sum();
            prop_assert_eq!(grouped, accounts.len());
        }
    }
}
