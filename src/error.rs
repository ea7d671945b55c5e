//! Service error taxonomy and HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested task does not exist.
    #[error("Task not found")]
    TaskNotFound,

    /// The request body failed validation before reaching the store.
    #[error("{0}")]
    Validation(String),

    /// Any failure from the storage layer.
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Structured message body for error responses.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::TaskNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Database(err) => {
                tracing::error!("database error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

/// Result type for request handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
