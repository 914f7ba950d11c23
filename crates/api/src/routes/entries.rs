//! Accounting entry (asiento) routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, error::error_response, middleware::AuthUser};
use partida_db::repositories::{
    CreateEntryInput, CreateEntryLineInput, EntryRepository, EntryWithLines,
};

/// Creates the entries router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies/{company_id}/entries", post(create_entry))
        .route("/companies/{company_id}/entries", get(list_entries))
}

/// One line of an entry creation request.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateEntryLineRequest {
    /// Account to post to.
    account_id: Uuid,
    /// Debit amount (debe).
    debit: Decimal,
    /// Credit amount (haber).
    credit: Decimal,
}

/// Create entry request payload.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateEntryRequest {
    /// Entry date (YYYY-MM-DD).
    entry_date: NaiveDate,
    /// Sequential entry number, unique per company.
    entry_number: i32,
    /// Supporting document reference.
    supporting_doc: Option<String>,
    /// Attached data blob.
    attached_data: Option<String>,
    /// Free-text note (leyenda).
    note: Option<String>,
    /// Line items; debits and credits must balance.
    lines: Vec<CreateEntryLineRequest>,
}

/// One line of an entry response.
#[derive(Debug, Serialize)]
struct EntryLineResponse {
    /// Referenced account.
    account_id: Uuid,
    /// Account code.
    account_code: String,
    /// Account display name.
    account_name: String,
    /// Debit amount.
    debit: Decimal,
    /// Credit amount.
    credit: Decimal,
}

/// Entry response payload.
#[derive(Debug, Serialize)]
struct EntryResponse {
    /// Entry ID.
    id: Uuid,
    /// Entry date (YYYY-MM-DD).
    entry_date: NaiveDate,
    /// Sequential entry number.
    entry_number: i32,
    /// Supporting document reference.
    supporting_doc: Option<String>,
    /// Attached data blob.
    attached_data: Option<String>,
    /// Free-text note.
    note: Option<String>,
    /// Author's full name.
    author: String,
    /// Lines in submission order.
    lines: Vec<EntryLineResponse>,
}

impl From<EntryWithLines> for EntryResponse {
    fn from(value: EntryWithLines) -> Self {
        Self {
            id: value.entry.id,
            entry_date: value.entry.entry_date,
            entry_number: value.entry.entry_number,
            supporting_doc: value.entry.supporting_doc,
            attached_data: value.entry.attached_data,
            note: value.entry.note,
            author: value.author_name,
            lines: value
                .lines
                .into_iter()
                .map(|line| EntryLineResponse {
                    account_id: line.account_id,
                    account_code: line.account_code,
                    account_name: line.account_name,
                    debit: line.debit,
                    credit: line.credit,
                })
                .collect(),
        }
    }
}

/// POST `/companies/{company_id}/entries` - Validate and record an entry.
///
/// The authenticated user becomes the entry's author. Unbalanced entries
/// are rejected with 422 carrying both totals; duplicate entry numbers
/// with 409.
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CreateEntryRequest>,
) -> impl IntoResponse {
    let entry_repo = EntryRepository::new((*state.db).clone());

    let input = CreateEntryInput {
        company_id,
        user_id: auth.user_id(),
        entry_date: payload.entry_date,
        entry_number: payload.entry_number,
        supporting_doc: payload.supporting_doc,
        attached_data: payload.attached_data,
        note: payload.note,
        lines: payload
            .lines
            .into_iter()
            .map(|line| CreateEntryLineInput {
                account_id: line.account_id,
                debit: line.debit,
                credit: line.credit,
            })
            .collect(),
    };

    match entry_repo.create_entry(input).await {
        Ok(created) => {
            info!(
                entry_id = %created.entry.id,
                company_id = %company_id,
                entry_number = created.entry.entry_number,
                created_by = %auth.user_id(),
                "Entry recorded"
            );
            (StatusCode::CREATED, Json(EntryResponse::from(created))).into_response()
        }
        Err(e) => {
            info!(error = %e, company_id = %company_id, "Entry rejected");
            error_response(e)
        }
    }
}

/// GET `/companies/{company_id}/entries` - List entries, newest first.
async fn list_entries(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> impl IntoResponse {
    let entry_repo = EntryRepository::new((*state.db).clone());

    match entry_repo.list_entries(company_id).await {
        Ok(entries) => {
            let body: Vec<EntryResponse> = entries.into_iter().map(EntryResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list entries");
            error_response(e)
        }
    }
}
