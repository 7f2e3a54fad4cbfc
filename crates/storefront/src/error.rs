//! Unified error handling for route handlers.
//!
//! All route handlers return `Result<T, AppError>`. Store operations
//! themselves never fail, so every error here is a client error: an unknown
//! product or a malformed id, quantity, category, or sort order. Server-side
//! failures (panics, storage warnings) reach Sentry through the tracing layer.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use deskfront_core::{CategoryError, ProductIdError, QuantityError};
use serde_json::json;
use thiserror::Error;

use crate::catalog::SortError;

/// Application-level error type for the storefront service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<ProductIdError> for AppError {
    fn from(err: ProductIdError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<QuantityError> for AppError {
    fn from(err: QuantityError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<SortError> for AppError {
    fn from(err: SortError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
