//! Account repository for chart of accounts database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use partida_shared::AppError;

use crate::entities::{chart_of_accounts, companies, entry_lines};

/// Error types for chart of accounts operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// A required field is blank.
    #[error("Field '{0}' must not be empty")]
    BlankField(&'static str),

    /// Account code already exists among the company's active accounts.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Company not found.
    #[error("Company not found: {0}")]
    CompanyNotFound(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Cannot deactivate an account referenced by entry lines.
    #[error("Cannot deactivate account: it is referenced by {0} entry lines")]
    HasEntryLines(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            // Duplicate active codes are a validation failure on this
            // surface, not a conflict; only entry numbers conflict.
            AccountError::BlankField(_)
            | AccountError::DuplicateCode(_)
            | AccountError::CompanyNotFound(_) => Self::Validation(err.to_string()),
            AccountError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            AccountError::HasEntryLines(_) => Self::BusinessRule(err.to_string()),
            AccountError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Company the account belongs to.
    pub company_id: Uuid,
    /// Category code (rubro).
    pub category_code: String,
    /// Category display name.
    pub category_name: String,
    /// Subcategory code (subrubro).
    pub subcategory_code: String,
    /// Subcategory display name.
    pub subcategory_name: String,
    /// Account code (unique per company among active accounts).
    pub code: String,
    /// Account display name.
    pub name: String,
}

/// Returns the name of the first blank required field, if any.
///
/// Pure helper so the blank-field rule can be tested without a database.
#[must_use]
pub fn blank_required_field(input: &CreateAccountInput) -> Option<&'static str> {
    let fields = [
        ("category_code", &input.category_code),
        ("category_name", &input.category_name),
        ("subcategory_code", &input.subcategory_code),
        ("subcategory_name", &input.subcategory_name),
        ("code", &input.code),
        ("name", &input.name),
    ];

    fields
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
}

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any required field is blank
    /// - The company does not exist
    /// - The code already exists among the company's active accounts
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<chart_of_accounts::Model, AccountError> {
        if let Some(field) = blank_required_field(&input) {
            return Err(AccountError::BlankField(field));
        }

        let company = companies::Entity::find_by_id(input.company_id)
            .one(&self.db)
            .await?;
        if company.is_none() {
            return Err(AccountError::CompanyNotFound(input.company_id));
        }

        // Unique code among ACTIVE accounts; the partial unique index
        // backs this check under concurrency.
        let existing = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::CompanyId.eq(input.company_id))
            .filter(chart_of_accounts::Column::Code.eq(&input.code))
            .filter(chart_of_accounts::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        let now = chrono::Utc::now().into();
        let account = chart_of_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            category_code: Set(input.category_code),
            category_name: Set(input.category_name),
            subcategory_code: Set(input.subcategory_code),
            subcategory_name: Set(input.subcategory_name),
            code: Set(input.code),
            name: Set(input.name),
            is_active: Set(true),
            created_at: Set(now),
        };

        let account = account.insert(&self.db).await?;
        Ok(account)
    }

    /// Lists active accounts for a company, ordered by account code.
    ///
    /// The ordering is stable and deterministic; report grouping iterates
    /// accounts in exactly this order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<chart_of_accounts::Model>, AccountError> {
        let accounts = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::CompanyId.eq(company_id))
            .filter(chart_of_accounts::Column::IsActive.eq(true))
            .order_by_asc(chart_of_accounts::Column::Code)
            .all(&self.db)
            .await?;

        Ok(accounts)
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_account_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<chart_of_accounts::Model>, AccountError> {
        let account = chart_of_accounts::Entity::find_by_id(id).one(&self.db).await?;
        Ok(account)
    }

    /// Deactivates (soft-deletes) an account.
    ///
    /// Accounts referenced by entry lines cannot be deactivated: lines
    /// hold non-owning references, and hiding a referenced account would
    /// silently drop its history from reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or referenced.
    pub async fn deactivate_account(&self, id: Uuid) -> Result<(), AccountError> {
        let account = chart_of_accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::AccountNotFound(id))?;

        let line_count = entry_lines::Entity::find()
            .filter(entry_lines::Column::AccountId.eq(id))
            .count(&self.db)
            .await?;
        if line_count > 0 {
            return Err(AccountError::HasEntryLines(line_count));
        }

        let mut active: chart_of_accounts::ActiveModel = account.into();
        active.is_active = Set(false);
        active.update(&self.db).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CreateAccountInput {
        CreateAccountInput {
            company_id: Uuid::new_v4(),
            category_code: "1".to_string(),
            category_name: "ACTIVO".to_string(),
            subcategory_code: "1.1".to_string(),
            subcategory_name: "ACTIVO CORRIENTE".to_string(),
            code: "1.1.01".to_string(),
            name: "Caja".to_string(),
        }
    }

    #[test]
    fn test_complete_input_has_no_blank_field() {
        assert_eq!(blank_required_field(&input()), None);
    }

    #[test]
    fn test_blank_code_detected() {
        let mut account = input();
        account.code = String::new();
        assert_eq!(blank_required_field(&account), Some("code"));
    }

    #[test]
    fn test_whitespace_only_name_detected() {
        let mut account = input();
        account.name = "   ".to_string();
        assert_eq!(blank_required_field(&account), Some("name"));
    }

    #[test]
    fn test_first_blank_field_wins() {
        let mut account = input();
        account.category_code = String::new();
        account.name = String::new();
        assert_eq!(blank_required_field(&account), Some("category_code"));
    }
}
