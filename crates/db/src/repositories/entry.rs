//! Entry repository for the append-only ledger store.
//!
//! An entry (asiento) and its lines are persisted as a single atomic unit:
//! either all rows exist after `create_entry` or none do. Duplicate entry
//! numbers are serialized by the (company_id, entry_number) unique
//! constraint rather than application-level locking.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use partida_core::ledger::{LedgerValidationError, LineAmounts, validate_lines};
use partida_core::reports::Movement;
use partida_shared::AppError;

use crate::entities::{chart_of_accounts, companies, entries, entry_lines, users};

/// Error types for ledger store operations.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// The proposed entry violates a ledger rule (empty, negative,
    /// excess precision, or unbalanced).
    #[error(transparent)]
    Invalid(#[from] LedgerValidationError),

    /// An entry with this number already exists for the company.
    #[error("Entry number {entry_number} already exists for this company")]
    DuplicateEntryNumber {
        /// Company scoping the entry number.
        company_id: Uuid,
        /// The rejected entry number.
        entry_number: i32,
    },

    /// Referenced company does not exist or is inactive.
    #[error("Company not found: {0}")]
    CompanyNotFound(Uuid),

    /// Referenced user does not exist.
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    /// A line references an account that does not exist or is inactive.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// A line references an account of a different company.
    #[error("Account {0} does not belong to this company")]
    AccountNotInCompany(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<EntryError> for AppError {
    fn from(err: EntryError) -> Self {
        match err {
            EntryError::Invalid(LedgerValidationError::Unbalanced {
                debit_total,
                credit_total,
            }) => Self::Imbalance {
                debit_total,
                credit_total,
            },
            EntryError::Invalid(_)
            | EntryError::CompanyNotFound(_)
            | EntryError::UserNotFound(_)
            | EntryError::AccountNotFound(_)
            | EntryError::AccountNotInCompany(_) => Self::Validation(err.to_string()),
            EntryError::DuplicateEntryNumber { .. } => Self::Conflict(err.to_string()),
            EntryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for a single entry line.
#[derive(Debug, Clone)]
pub struct CreateEntryLineInput {
    /// Account to post to.
    pub account_id: Uuid,
    /// Debit amount (debe), non-negative scale-2.
    pub debit: Decimal,
    /// Credit amount (haber), non-negative scale-2.
    pub credit: Decimal,
}

/// Input for creating an entry.
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    /// Company the entry belongs to.
    pub company_id: Uuid,
    /// Authoring user.
    pub user_id: Uuid,
    /// Entry date (calendar date, no time component).
    pub entry_date: NaiveDate,
    /// Caller-supplied sequential number, unique per company.
    pub entry_number: i32,
    /// Optional supporting document reference.
    pub supporting_doc: Option<String>,
    /// Optional attached data blob.
    pub attached_data: Option<String>,
    /// Optional free-text note (leyenda).
    pub note: Option<String>,
    /// Line items; must balance.
    pub lines: Vec<CreateEntryLineInput>,
}

/// One line of a persisted entry with its account's display fields.
#[derive(Debug, Clone)]
pub struct EntryLineDetail {
    /// Referenced account.
    pub account_id: Uuid,
    /// Account code.
    pub account_code: String,
    /// Account display name.
    pub account_name: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// A persisted entry with its author's name and line details.
#[derive(Debug, Clone)]
pub struct EntryWithLines {
    /// Entry header.
    pub entry: entries::Model,
    /// Author's full name ("first last").
    pub author_name: String,
    /// Lines in submission order.
    pub lines: Vec<EntryLineDetail>,
}

/// Entry repository for the append-only ledger store.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and persists an entry with all its lines atomically.
    ///
    /// Validation runs before anything touches the database; an entry that
    /// fails the balance law never reaches the store. The entry header and
    /// every line are inserted inside one database transaction - committed
    /// on success, rolled back on any failure - so readers never observe a
    /// partial entry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lines are empty, negative, over-precise, or unbalanced
    /// - The company, user, or any referenced account is missing
    /// - The entry number already exists for the company (unique
    ///   constraint violation, reported as a conflict)
    pub async fn create_entry(
        &self,
        input: CreateEntryInput,
    ) -> Result<EntryWithLines, EntryError> {
        let amounts: Vec<LineAmounts> = input
            .lines
            .iter()
            .map(|line| LineAmounts {
                debit: line.debit,
                credit: line.credit,
            })
            .collect();
        validate_lines(&amounts)?;

        let company = companies::Entity::find_by_id(input.company_id)
            .filter(companies::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;
        if company.is_none() {
            return Err(EntryError::CompanyNotFound(input.company_id));
        }

        let user = users::Entity::find_by_id(input.user_id).one(&self.db).await?;
        let Some(user) = user else {
            return Err(EntryError::UserNotFound(input.user_id));
        };

        let accounts = self.load_referenced_accounts(&input).await?;

        let txn = self.db.begin().await?;

        let entry_id = Uuid::new_v4();
        let now = chrono::Utc::now().into();
        let entry = entries::ActiveModel {
            id: Set(entry_id),
            company_id: Set(input.company_id),
            user_id: Set(input.user_id),
            entry_date: Set(input.entry_date),
            entry_number: Set(input.entry_number),
            supporting_doc: Set(input.supporting_doc.clone()),
            attached_data: Set(input.attached_data.clone()),
            note: Set(input.note.clone()),
            created_at: Set(now),
        };

        let entry = match entry.insert(&txn).await {
            Ok(model) => model,
            Err(e) => {
                // Unique violation on (company_id, entry_number): another
                // entry with this number won the race or already existed.
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    return Err(EntryError::DuplicateEntryNumber {
                        company_id: input.company_id,
                        entry_number: input.entry_number,
                    });
                }
                return Err(e.into());
            }
        };

        let mut lines = Vec::with_capacity(input.lines.len());
        for (index, line_input) in (0i32..).zip(input.lines.iter()) {
            let line = entry_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                entry_id: Set(entry_id),
                account_id: Set(line_input.account_id),
                line_index: Set(index),
                debit: Set(line_input.debit),
                credit: Set(line_input.credit),
            };
            line.insert(&txn).await?;

            let account = &accounts[&line_input.account_id];
            lines.push(EntryLineDetail {
                account_id: line_input.account_id,
                account_code: account.code.clone(),
                account_name: account.name.clone(),
                debit: line_input.debit,
                credit: line_input.credit,
            });
        }

        txn.commit().await?;

        Ok(EntryWithLines {
            entry,
            author_name: format!("{} {}", user.first_name, user.last_name),
            lines,
        })
    }

    /// Loads and checks every account referenced by the input lines.
    async fn load_referenced_accounts(
        &self,
        input: &CreateEntryInput,
    ) -> Result<HashMap<Uuid, chart_of_accounts::Model>, EntryError> {
        let mut accounts = HashMap::new();

        for line in &input.lines {
            if accounts.contains_key(&line.account_id) {
                continue;
            }

            let account = chart_of_accounts::Entity::find_by_id(line.account_id)
                .filter(chart_of_accounts::Column::IsActive.eq(true))
                .one(&self.db)
                .await?
                .ok_or(EntryError::AccountNotFound(line.account_id))?;

            if account.company_id != input.company_id {
                return Err(EntryError::AccountNotInCompany(line.account_id));
            }

            accounts.insert(line.account_id, account);
        }

        Ok(accounts)
    }

    /// Lists a company's entries with lines, newest first.
    ///
    /// Ordered by (entry_date DESC, entry_number DESC); the secondary sort
    /// keeps same-date ordering stable and deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(&self, company_id: Uuid) -> Result<Vec<EntryWithLines>, EntryError> {
        let rows = entries::Entity::find()
            .filter(entries::Column::CompanyId.eq(company_id))
            .order_by_desc(entries::Column::EntryDate)
            .order_by_desc(entries::Column::EntryNumber)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let entry_ids: Vec<Uuid> = rows.iter().map(|(entry, _)| entry.id).collect();
        let mut lines_by_entry = self.load_lines(entry_ids).await?;

        let result = rows
            .into_iter()
            .map(|(entry, user)| {
                let author_name = user
                    .map(|u| format!("{} {}", u.first_name, u.last_name))
                    .unwrap_or_default();
                let lines = lines_by_entry.remove(&entry.id).unwrap_or_default();
                EntryWithLines {
                    entry,
                    author_name,
                    lines,
                }
            })
            .collect();

        Ok(result)
    }

    /// Loads line details for a set of entries in one joined query,
    /// grouped by entry and kept in submission order.
    async fn load_lines(
        &self,
        entry_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<EntryLineDetail>>, EntryError> {
        #[derive(Debug, FromQueryResult)]
        struct LineRow {
            entry_id: Uuid,
            account_id: Uuid,
            debit: Decimal,
            credit: Decimal,
            account_code: String,
            account_name: String,
        }

        let rows: Vec<LineRow> = entry_lines::Entity::find()
            .filter(entry_lines::Column::EntryId.is_in(entry_ids))
            .join(
                JoinType::InnerJoin,
                entry_lines::Relation::ChartOfAccounts.def(),
            )
            .column_as(chart_of_accounts::Column::Code, "account_code")
            .column_as(chart_of_accounts::Column::Name, "account_name")
            .order_by_asc(entry_lines::Column::EntryId)
            .order_by_asc(entry_lines::Column::LineIndex)
            .into_model::<LineRow>()
            .all(&self.db)
            .await?;

        let mut lines_by_entry: HashMap<Uuid, Vec<EntryLineDetail>> = HashMap::new();
        for row in rows {
            lines_by_entry
                .entry(row.entry_id)
                .or_default()
                .push(EntryLineDetail {
                    account_id: row.account_id,
                    account_code: row.account_code,
                    account_name: row.account_name,
                    debit: row.debit,
                    credit: row.credit,
                });
        }

        Ok(lines_by_entry)
    }

    /// Returns one account's movements for a company in chronological
    /// order: (entry_date ASC, entry_number ASC).
    ///
    /// This ascending order is mandatory - running balances depend on
    /// processing order. The join happens at the storage layer and returns
    /// a flat ordered sequence; there is no lazy relationship traversal.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn entry_movements(
        &self,
        company_id: Uuid,
        account_id: Uuid,
    ) -> Result<Vec<Movement>, DbErr> {
        #[derive(Debug, FromQueryResult)]
        struct MovementRow {
            entry_date: NaiveDate,
            entry_number: i32,
            debit: Decimal,
            credit: Decimal,
        }

        let rows: Vec<MovementRow> = entry_lines::Entity::find()
            .select_only()
            .column(entry_lines::Column::Debit)
            .column(entry_lines::Column::Credit)
            .column_as(entries::Column::EntryDate, "entry_date")
            .column_as(entries::Column::EntryNumber, "entry_number")
            .join(JoinType::InnerJoin, entry_lines::Relation::Entries.def())
            .filter(entry_lines::Column::AccountId.eq(account_id))
            .filter(entries::Column::CompanyId.eq(company_id))
            .order_by_asc(entries::Column::EntryDate)
            .order_by_asc(entries::Column::EntryNumber)
            .order_by_asc(entry_lines::Column::LineIndex)
            .into_model::<MovementRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Movement {
                date: row.entry_date,
                entry_number: row.entry_number,
                debit: row.debit,
                credit: row.credit,
            })
            .collect())
    }
}
