//! Ledger report routes.
//!
//! Reports are computed fresh from the entry store on every request.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::error;
use uuid::Uuid;

use crate::{AppState, error::error_response};
use partida_db::repositories::ReportRepository;

/// Creates the reports router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{company_id}/reports/general-ledger",
            get(general_ledger),
        )
        .route(
            "/companies/{company_id}/reports/financial-position",
            get(financial_position),
        )
}

/// GET `/companies/{company_id}/reports/general-ledger` - Running balances
/// per account (libro mayor).
async fn general_ledger(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> impl IntoResponse {
    let report_repo = ReportRepository::new((*state.db).clone());

    match report_repo.general_ledger(company_id).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!(error = %e, company_id = %company_id, "Failed to compute general ledger");
            error_response(e)
        }
    }
}

/// GET `/companies/{company_id}/reports/financial-position` - Net balances
/// grouped by category and subcategory (estado de situación patrimonial).
async fn financial_position(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> impl IntoResponse {
    let report_repo = ReportRepository::new((*state.db).clone());

    match report_repo.financial_position(company_id).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!(error = %e, company_id = %company_id, "Failed to compute financial position");
            error_response(e)
        }
    }
}
