//! Error response mapping.
//!
//! Domain errors from the repositories convert into the shared `AppError`
//! taxonomy, which carries the HTTP status and machine-readable error code
//! for the response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use partida_shared::AppError;

/// Renders a domain error as a JSON error response.
///
/// Bodies have the shape `{"error": CODE, "message": text}`; imbalance
/// errors additionally carry `debit_total` and `credit_total` so clients
/// can render a precise diagnostic.
pub fn error_response(err: impl Into<AppError>) -> Response {
    let err = err.into();
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut body = json!({
        "error": err.error_code(),
        "message": err.to_string(),
    });
    if let AppError::Imbalance {
        debit_total,
        credit_total,
    } = &err
    {
        body["debit_total"] = json!(debit_total);
        body["credit_total"] = json!(credit_total);
    }

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_imbalance_response_is_unprocessable() {
        let response = error_response(AppError::Imbalance {
            debit_total: dec!(100.00),
            credit_total: dec!(50.00),
        });
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_conflict_response_status() {
        let response = error_response(AppError::Conflict("duplicate".to_string()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_response_status() {
        let response = error_response(AppError::Validation("bad input".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
