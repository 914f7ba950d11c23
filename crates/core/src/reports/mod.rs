//! Financial report computation.
//!
//! Pure report algorithms over account movements:
//! - General ledger (libro mayor): per-account running balances
//! - Financial position (estado de situación patrimonial): net balances
//!   grouped by category and subcategory
//!
//! Reports are computed fresh from the movement stream on every request;
//! there is no materialized view or cache.

pub mod service;
pub mod types;

pub use service::{group_positions, net_balance, running_balance};
pub use types::{
    AccountGrouping, AccountLedger, AccountPosition, CategoryGroup, FinancialPosition, LedgerLine,
    Movement, SubcategoryGroup,
};
