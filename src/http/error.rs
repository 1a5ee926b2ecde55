//! HTTP error response

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::domain::DomainError;

/// Storage failure escaping a handler, answered with a status and plain text
#[derive(Debug)]
pub struct AppError(pub DomainError);

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.0 {
            DomainError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("Not found: {}", what)).into_response()
            }
            DomainError::InvalidInput(reason) => {
                (StatusCode::UNPROCESSABLE_ENTITY, reason).into_response()
            }
            // Details stay in the log
            DomainError::Internal(detail) => {
                error!(%detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
