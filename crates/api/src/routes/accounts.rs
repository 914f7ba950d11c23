//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, error::error_response, middleware::AuthUser};
use partida_db::repositories::{AccountRepository, CreateAccountInput};

/// Creates the chart of accounts router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies/{company_id}/accounts", post(create_account))
        .route("/companies/{company_id}/accounts", get(list_accounts))
        .route("/accounts/{account_id}", delete(deactivate_account))
}

/// Create account request payload.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateAccountRequest {
    /// Category code (rubro).
    category_code: String,
    /// Category display name.
    category_name: String,
    /// Subcategory code (subrubro).
    subcategory_code: String,
    /// Subcategory display name.
    subcategory_name: String,
    /// Account code.
    code: String,
    /// Account display name.
    name: String,
}

/// POST `/companies/{company_id}/accounts` - Add an account to the chart.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let account_repo = AccountRepository::new((*state.db).clone());

    let input = CreateAccountInput {
        company_id,
        category_code: payload.category_code,
        category_name: payload.category_name,
        subcategory_code: payload.subcategory_code,
        subcategory_name: payload.subcategory_name,
        code: payload.code,
        name: payload.name,
    };

    match account_repo.create_account(input).await {
        Ok(account) => {
            info!(
                account_id = %account.id,
                company_id = %company_id,
                code = %account.code,
                created_by = %auth.user_id(),
                "Account created"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "id": account.id,
                    "company_id": account.company_id,
                    "category_code": account.category_code,
                    "category_name": account.category_name,
                    "subcategory_code": account.subcategory_code,
                    "subcategory_name": account.subcategory_name,
                    "code": account.code,
                    "name": account.name
                })),
            )
                .into_response()
        }
        Err(e) => {
            info!(error = %e, company_id = %company_id, "Account creation rejected");
            error_response(e)
        }
    }
}

/// GET `/companies/{company_id}/accounts` - List active accounts by code.
async fn list_accounts(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> impl IntoResponse {
    let account_repo = AccountRepository::new((*state.db).clone());

    match account_repo.list_accounts(company_id).await {
        Ok(accounts) => {
            let body: Vec<serde_json::Value> = accounts
                .into_iter()
                .map(|a| {
                    json!({
                        "id": a.id,
                        "category_code": a.category_code,
                        "category_name": a.category_name,
                        "subcategory_code": a.subcategory_code,
                        "subcategory_name": a.subcategory_name,
                        "code": a.code,
                        "name": a.name
                    })
                })
                .collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list accounts");
            error_response(e)
        }
    }
}

/// DELETE `/accounts/{account_id}` - Deactivate (soft-delete) an account.
async fn deactivate_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(account_id): Path<Uuid>,
) -> impl IntoResponse {
    let account_repo = AccountRepository::new((*state.db).clone());

    match account_repo.deactivate_account(account_id).await {
        Ok(()) => {
            info!(
                account_id = %account_id,
                deactivated_by = %auth.user_id(),
                "Account deactivated"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            info!(error = %e, account_id = %account_id, "Account deactivation rejected");
            error_response(e)
        }
    }
}
