//! Purchase and sale sub-ledger routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, error::error_response, middleware::AuthUser};
use partida_db::repositories::{CreateSubledgerInput, SubledgerRepository};

/// Creates the sub-ledger router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies/{company_id}/purchases", post(create_purchase))
        .route("/companies/{company_id}/purchases", get(list_purchases))
        .route("/companies/{company_id}/sales", post(create_sale))
        .route("/companies/{company_id}/sales", get(list_sales))
}

/// Create purchase/sale record request payload.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateRecordRequest {
    /// Supporting document reference.
    document_ref: String,
    /// Record date (YYYY-MM-DD).
    record_date: NaiveDate,
    /// Counterparty contact.
    contact: Option<String>,
    /// Amount (positive, scale-2).
    amount: Decimal,
    /// Payment terms.
    terms: Option<String>,
}

impl CreateRecordRequest {
    fn into_input(self, company_id: Uuid) -> CreateSubledgerInput {
        CreateSubledgerInput {
            company_id,
            document_ref: self.document_ref,
            record_date: self.record_date,
            contact: self.contact,
            amount: self.amount,
            terms: self.terms,
        }
    }
}

/// POST `/companies/{company_id}/purchases` - Record a purchase.
async fn create_purchase(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CreateRecordRequest>,
) -> impl IntoResponse {
    let repo = SubledgerRepository::new((*state.db).clone());

    match repo.create_purchase(payload.into_input(company_id)).await {
        Ok(record) => {
            info!(
                record_id = %record.id,
                company_id = %company_id,
                created_by = %auth.user_id(),
                "Purchase recorded"
            );
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => {
            info!(error = %e, company_id = %company_id, "Purchase rejected");
            error_response(e)
        }
    }
}

/// GET `/companies/{company_id}/purchases` - List purchases, newest first.
async fn list_purchases(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SubledgerRepository::new((*state.db).clone());

    match repo.list_purchases(company_id).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list purchases");
            error_response(e)
        }
    }
}

/// POST `/companies/{company_id}/sales` - Record a sale.
async fn create_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CreateRecordRequest>,
) -> impl IntoResponse {
    let repo = SubledgerRepository::new((*state.db).clone());

    match repo.create_sale(payload.into_input(company_id)).await {
        Ok(record) => {
            info!(
                record_id = %record.id,
                company_id = %company_id,
                created_by = %auth.user_id(),
                "Sale recorded"
            );
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => {
            info!(error = %e, company_id = %company_id, "Sale rejected");
            error_response(e)
        }
    }
}

/// GET `/companies/{company_id}/sales` - List sales, newest first.
async fn list_sales(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SubledgerRepository::new((*state.db).clone());

    match repo.list_sales(company_id).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list sales");
            error_response(e)
        }
    }
}
