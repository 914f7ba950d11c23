//! Report repository for financial report queries.
//!
//! Both reports walk the active chart of accounts in code order and are
//! computed fresh on every call - no materialized view, no cache. The
//! arithmetic lives in `partida_core::reports`; this repository only
//! fetches ordered movement streams.

use sea_orm::{DatabaseConnection, DbErr};
use uuid::Uuid;

use partida_core::reports::{
    AccountGrouping, AccountLedger, FinancialPosition, group_positions, net_balance,
    running_balance,
};
use partida_shared::AppError;

use super::account::{AccountError, AccountRepository};
use super::entry::EntryRepository;

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

impl From<AccountError> for ReportError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Database(e) => Self::Database(e),
            // The account repository only raises database errors on the
            // read paths the reports use.
            other => Self::Database(DbErr::Custom(other.to_string())),
        }
    }
}

/// Report repository computing ledger reports from the entry store.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    accounts: AccountRepository,
    entries: EntryRepository,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            entries: EntryRepository::new(db),
        }
    }

    /// Computes the general ledger (libro mayor) for a company.
    ///
    /// For every active account, fetches its movements in chronological
    /// order and computes the running balance series; accounts with no
    /// movements are included with an empty series and zero final balance.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn general_ledger(&self, company_id: Uuid) -> Result<Vec<AccountLedger>, ReportError> {
        let accounts = self.accounts.list_accounts(company_id).await?;

        let mut report = Vec::with_capacity(accounts.len());
        for account in accounts {
            let movements = self.entries.entry_movements(company_id, account.id).await?;
            report.push(running_balance(account.code, account.name, &movements));
        }

        Ok(report)
    }

    /// Computes the financial position (estado de situación patrimonial)
    /// for a company.
    ///
    /// Every active account contributes its net balance - sum(debit) minus
    /// sum(credit) over all movements, accumulated in exact decimals - and
    /// accounts are grouped by category and subcategory code, groups
    /// created lazily in chart iteration order.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn financial_position(
        &self,
        company_id: Uuid,
    ) -> Result<FinancialPosition, ReportError> {
        let accounts = self.accounts.list_accounts(company_id).await?;

        let mut balances = Vec::with_capacity(accounts.len());
        for account in accounts {
            let movements = self.entries.entry_movements(company_id, account.id).await?;
            let balance = net_balance(&movements);
            balances.push((
                AccountGrouping {
                    category_code: account.category_code,
                    category_name: account.category_name,
                    subcategory_code: account.subcategory_code,
                    subcategory_name: account.subcategory_name,
                    code: account.code,
                    name: account.name,
                },
                balance,
            ));
        }

        Ok(group_positions(&balances))
    }
}
