//! Error type for the HTTP layer and its mapping onto status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::proto::ErrorResponse;
use crate::Error;

/// Errors produced while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be decoded.
    #[error("{0}")]
    InvalidInput(String),

    /// The log rejected the operation.
    #[error(transparent)]
    Log(#[from] Error),
}

impl ApiError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Log(Error::OffsetNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Log(Error::CapacityExceeded { .. }) => StatusCode::INSUFFICIENT_STORAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(status = status.as_u16(), "request failed: {}", self);
        (status, Json(ErrorResponse::error(self.to_string()))).into_response()
    }
}
