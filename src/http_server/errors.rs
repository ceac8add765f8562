//! # API Errors
//!
//! Handler-boundary errors. Every failure becomes `{"error": "<message>"}`
//! with a 401 or 500 status; internal messages are passed through as-is.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::AuthError;
use crate::catalog::CatalogError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failure
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Uploaded dataset rejected or could not be stored
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Upload request unusable (no file, bad multipart)
    #[error("{0}")]
    Upload(String),

    /// Anything else that went wrong while handling a request
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Auth(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::UNAUTHORIZED)
            }
            ApiError::Catalog(_) | ApiError::Upload(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
