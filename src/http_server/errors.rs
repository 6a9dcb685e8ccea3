//! # HTTP API Errors
//!
//! Maps core errors onto HTTP status codes and a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::Logger;
use crate::query::QueryError;
use crate::store::StoreError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing, not JSON, or wrong content type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path segment could not be decoded
    #[error("Invalid request path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) | ApiError::InvalidPath(_) => StatusCode::BAD_REQUEST,

            ApiError::Store(err) => match err {
                StoreError::MissingValue => StatusCode::BAD_REQUEST,
                StoreError::InvalidValueType => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::Duplicate(_) => StatusCode::CONFLICT,
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Persistence(_) | StoreError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },

            ApiError::Query(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::from(&self);
        let code = status.as_u16().to_string();

        if status.is_server_error() {
            Logger::error("REQUEST_FAILED", &[("code", code.as_str()), ("error", body.error.as_str())]);
        } else {
            Logger::warn("REQUEST_REJECTED", &[("code", code.as_str()), ("error", body.error.as_str())]);
        }

        (status, Json(body)).into_response()
    }
}
