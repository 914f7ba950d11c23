//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger rule: every accounting entry
//! (asiento) must debit exactly as much as it credits. Validation runs
//! before anything reaches storage; the store never holds an unbalanced
//! entry.

pub mod validation;

pub use validation::{LedgerValidationError, LineAmounts, entry_totals, validate_lines};
