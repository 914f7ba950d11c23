//! Company management routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, error::error_response, middleware::AuthUser};
use partida_db::repositories::{CompanyRepository, CreateCompanyInput};

/// Creates the companies router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies", post(create_company))
        .route("/companies", get(list_companies))
}

/// Create company request payload.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CreateCompanyRequest {
    /// Company name.
    name: String,
    /// Tax identification number.
    tax_id: Option<String>,
    /// Street address.
    address: Option<String>,
    /// Phone number.
    phone: Option<String>,
    /// Contact email.
    email: Option<String>,
}

/// POST /companies - Create a new company.
async fn create_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCompanyRequest>,
) -> impl IntoResponse {
    let company_repo = CompanyRepository::new((*state.db).clone());

    let input = CreateCompanyInput {
        name: payload.name,
        tax_id: payload.tax_id,
        address: payload.address,
        phone: payload.phone,
        email: payload.email,
    };

    match company_repo.create_company(input).await {
        Ok(company) => {
            info!(
                company_id = %company.id,
                created_by = %auth.user_id(),
                "Company created"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "id": company.id,
                    "name": company.name,
                    "tax_id": company.tax_id,
                    "address": company.address,
                    "phone": company.phone,
                    "email": company.email,
                    "created_at": company.created_at
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create company");
            error_response(e)
        }
    }
}

/// GET /companies - List active companies.
async fn list_companies(State(state): State<AppState>) -> impl IntoResponse {
    let company_repo = CompanyRepository::new((*state.db).clone());

    match company_repo.list_companies().await {
        Ok(companies) => {
            let body: Vec<serde_json::Value> = companies
                .into_iter()
                .map(|c| {
                    json!({
                        "id": c.id,
                        "name": c.name,
                        "tax_id": c.tax_id,
                        "address": c.address,
                        "phone": c.phone,
                        "email": c.email
                    })
                })
                .collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list companies");
            error_response(e)
        }
    }
}
