//! Report domain types.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// One movement of an account: a single entry line joined with its entry.
///
/// Movements must be supplied in (date ascending, entry number ascending)
/// order; running balances depend on processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    /// Entry date.
    pub date: NaiveDate,
    /// Sequential entry number within the company.
    pub entry_number: i32,
    /// Debit amount posted to the account.
    pub debit: Decimal,
    /// Credit amount posted to the account.
    pub credit: Decimal,
}

/// A movement annotated with the running balance after applying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerLine {
    /// Entry date.
    pub date: NaiveDate,
    /// Sequential entry number within the company.
    pub entry_number: i32,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Running balance after this movement.
    pub balance: Decimal,
}

/// General ledger section for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountLedger {
    /// Account code.
    pub account_code: String,
    /// Account display name.
    pub account_name: String,
    /// Chronological movements with running balances.
    pub movements: Vec<LedgerLine>,
    /// Final balance: last running value, or zero with no movements.
    pub final_balance: Decimal,
}

/// Grouping coordinates of an account within the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountGrouping {
    /// Category code (rubro).
    pub category_code: String,
    /// Category display name.
    pub category_name: String,
    /// Subcategory code (subrubro).
    pub subcategory_code: String,
    /// Subcategory display name.
    pub subcategory_name: String,
    /// Account code.
    pub code: String,
    /// Account display name.
    pub name: String,
}

/// An account with its net balance, as listed in the financial position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountPosition {
    /// Account code.
    pub code: String,
    /// Account display name.
    pub name: String,
    /// Net balance: sum(debit) - sum(credit) over all movements.
    pub balance: Decimal,
}

/// Accounts of one subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryGroup {
    /// Subcategory display name.
    pub subcategory: String,
    /// Accounts in chart iteration order.
    pub accounts: Vec<AccountPosition>,
}

/// Subcategories of one category, keyed by subcategory code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    /// Category display name.
    pub category: String,
    /// Subcategory groups keyed by subcategory code. Key order is not
    /// guaranteed; consumers sort by code for display.
    pub subcategories: HashMap<String, SubcategoryGroup>,
}

/// Financial position report: category code -> category group.
///
/// Key order is not guaranteed; consumers needing a stable display order
/// must sort by category/subcategory code explicitly.
pub type FinancialPosition = HashMap<String, CategoryGroup>;
