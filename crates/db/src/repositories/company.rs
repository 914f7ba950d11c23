//! Company repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use partida_shared::AppError;

use crate::entities::companies;

/// Error types for company operations.
#[derive(Debug, thiserror::Error)]
pub enum CompanyError {
    /// Company name is blank.
    #[error("Company name must not be empty")]
    BlankName,

    /// Tax ID already registered to another company.
    #[error("Tax ID '{0}' is already registered")]
    DuplicateTaxId(String),

    /// Company not found.
    #[error("Company not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CompanyError> for AppError {
    fn from(err: CompanyError) -> Self {
        match err {
            CompanyError::BlankName | CompanyError::DuplicateTaxId(_) => {
                Self::Validation(err.to_string())
            }
            CompanyError::NotFound(_) => Self::NotFound(err.to_string()),
            CompanyError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a company.
#[derive(Debug, Clone)]
pub struct CreateCompanyInput {
    /// Company name.
    pub name: String,
    /// Tax identification number (unique when present).
    pub tax_id: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
}

/// Company repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new company with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the tax ID is already
    /// registered, or the insert fails.
    pub async fn create_company(
        &self,
        input: CreateCompanyInput,
    ) -> Result<companies::Model, CompanyError> {
        if input.name.trim().is_empty() {
            return Err(CompanyError::BlankName);
        }

        if let Some(tax_id) = &input.tax_id {
            let existing = companies::Entity::find()
                .filter(companies::Column::TaxId.eq(tax_id))
                .count(&self.db)
                .await?;

            if existing > 0 {
                return Err(CompanyError::DuplicateTaxId(tax_id.clone()));
            }
        }

        let now = chrono::Utc::now().into();
        let company = companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            tax_id: Set(input.tax_id),
            address: Set(input.address),
            phone: Set(input.phone),
            email: Set(input.email),
            is_active: Set(true),
            created_at: Set(now),
        };

        let company = company.insert(&self.db).await?;
        Ok(company)
    }

    /// Lists active companies in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_companies(&self) -> Result<Vec<companies::Model>, CompanyError> {
        let companies = companies::Entity::find()
            .filter(companies::Column::IsActive.eq(true))
            .order_by_asc(companies::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(companies)
    }

    /// Finds a company by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<companies::Model>, CompanyError> {
        let company = companies::Entity::find_by_id(id).one(&self.db).await?;
        Ok(company)
    }

    /// Checks that an active company with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn company_exists(&self, id: Uuid) -> Result<bool, CompanyError> {
        let count = companies::Entity::find()
            .filter(companies::Column::Id.eq(id))
            .filter(companies::Column::IsActive.eq(true))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
