//! Sub-ledger repository for purchase and sale records.
//!
//! Simple persistence glue: create and list keyed by company, no
//! derivation into the main ledger.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use partida_shared::AppError;
use partida_shared::types::is_valid_scale;

use crate::entities::{companies, purchase_records, sale_records};

/// Error types for sub-ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum SubledgerError {
    /// Supporting document reference is blank.
    #[error("Document reference must not be empty")]
    BlankDocumentRef,

    /// Amount is not a positive scale-2 decimal.
    #[error("Amount must be positive with at most 2 decimal places")]
    InvalidAmount,

    /// Company not found.
    #[error("Company not found: {0}")]
    CompanyNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<SubledgerError> for AppError {
    fn from(err: SubledgerError) -> Self {
        match err {
            SubledgerError::BlankDocumentRef
            | SubledgerError::InvalidAmount
            | SubledgerError::CompanyNotFound(_) => Self::Validation(err.to_string()),
            SubledgerError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a purchase or sale record.
#[derive(Debug, Clone)]
pub struct CreateSubledgerInput {
    /// Company the record belongs to.
    pub company_id: Uuid,
    /// Supporting document reference (required).
    pub document_ref: String,
    /// Record date.
    pub record_date: NaiveDate,
    /// Counterparty contact.
    pub contact: Option<String>,
    /// Amount (positive, scale-2).
    pub amount: Decimal,
    /// Payment terms.
    pub terms: Option<String>,
}

/// Sub-ledger repository for purchase and sale records.
#[derive(Debug, Clone)]
pub struct SubledgerRepository {
    db: DatabaseConnection,
}

impl SubledgerRepository {
    /// Creates a new sub-ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates common sub-ledger input rules.
    async fn check_input(&self, input: &CreateSubledgerInput) -> Result<(), SubledgerError> {
        if input.document_ref.trim().is_empty() {
            return Err(SubledgerError::BlankDocumentRef);
        }
        if input.amount <= Decimal::ZERO || !is_valid_scale(input.amount) {
            return Err(SubledgerError::InvalidAmount);
        }

        let company_count = companies::Entity::find()
            .filter(companies::Column::Id.eq(input.company_id))
            .filter(companies::Column::IsActive.eq(true))
            .count(&self.db)
            .await?;
        if company_count == 0 {
            return Err(SubledgerError::CompanyNotFound(input.company_id));
        }

        Ok(())
    }

    /// Creates a purchase record.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the insert fails.
    pub async fn create_purchase(
        &self,
        input: CreateSubledgerInput,
    ) -> Result<purchase_records::Model, SubledgerError> {
        self.check_input(&input).await?;

        let now = chrono::Utc::now().into();
        let record = purchase_records::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            document_ref: Set(input.document_ref),
            record_date: Set(input.record_date),
            contact: Set(input.contact),
            amount: Set(input.amount),
            terms: Set(input.terms),
            created_at: Set(now),
        };

        let record = record.insert(&self.db).await?;
        Ok(record)
    }

    /// Lists a company's purchase records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_purchases(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<purchase_records::Model>, SubledgerError> {
        let records = purchase_records::Entity::find()
            .filter(purchase_records::Column::CompanyId.eq(company_id))
            .order_by_desc(purchase_records::Column::RecordDate)
            .order_by_desc(purchase_records::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(records)
    }

    /// Creates a sale record.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the insert fails.
    pub async fn create_sale(
        &self,
        input: CreateSubledgerInput,
    ) -> Result<sale_records::Model, SubledgerError> {
        self.check_input(&input).await?;

        let now = chrono::Utc::now().into();
        let record = sale_records::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            document_ref: Set(input.document_ref),
            record_date: Set(input.record_date),
            contact: Set(input.contact),
            amount: Set(input.amount),
            terms: Set(input.terms),
            created_at: Set(now),
        };

        let record = record.insert(&self.db).await?;
        Ok(record)
    }

    /// Lists a company's sale records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_sales(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<sale_records::Model>, SubledgerError> {
        let records = sale_records::Entity::find()
            .filter(sale_records::Column::CompanyId.eq(company_id))
            .order_by_desc(sale_records::Column::RecordDate)
            .order_by_desc(sale_records::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(records)
    }
}
