//! Error handling module
//!
//! HTTP response conversion for the service error taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::LedgerError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Boundary-level error wrapper. Handlers return this; the service layer
/// stays HTTP-free.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Ledger(ref err) = self;

        let (status, error_code) = match err {
            // 400 Bad Request
            LedgerError::InvalidAmount(_) => (StatusCode::BAD_REQUEST, "invalid_amount"),
            LedgerError::InvalidAge(_) => (StatusCode::BAD_REQUEST, "invalid_age"),
            LedgerError::InsufficientFunds { .. } => {
                (StatusCode::BAD_REQUEST, "insufficient_funds")
            }

            // 404 Not Found
            LedgerError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),
            LedgerError::CustomerNotFound(_) => (StatusCode::NOT_FOUND, "customer_not_found"),

            // 503 Service Unavailable: the transfer budget ran out, nothing
            // was committed, the caller may try again.
            LedgerError::TransferTimedOut { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "transfer_timed_out")
            }

            // 500 Internal Server Error
            LedgerError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "store_error")
            }
        };

        let body = ErrorResponse {
            error: err.to_string(),
            error_code: error_code.to_string(),
            details: None,
        };

        (status, Json(body)).into_response()
    }
}
