//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use emend::EmendError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Conflict (e.g., analysis superseded by a newer document).
    Conflict(String),
    /// Internal server error.
    Internal(String),
    /// Error from the emend library.
    Emend(EmendError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            ApiError::Emend(e) => match e {
                EmendError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                EmendError::Overlap { .. } | EmendError::InvalidSpan { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "invalid_batch")
                }
                EmendError::Config(_) | EmendError::Regex(_) => {
                    (StatusCode::BAD_REQUEST, "bad_request")
                }
                EmendError::Io { .. } | EmendError::Persistence(_) | EmendError::Json(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status();
        let message = match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => msg,
            ApiError::Emend(e) => e.to_string(),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<EmendError> for ApiError {
    fn from(err: EmendError) -> Self {
        ApiError::Emend(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Emend(e) => write!(f, "Emend error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
