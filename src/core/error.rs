//! Typed error handling for taskdeck
//!
//! Every fallible operation below the HTTP boundary returns [`ApiError`].
//! The [`IntoResponse`] implementation at the bottom is the single place
//! where an error kind is mapped to an HTTP status and a user-safe message;
//! no handler or service writes to the response directly.
//!
//! # Error Categories
//!
//! - `Validation`: bad enum value, missing required field, disallowed field change → 400
//! - `Unauthorized`: missing/invalid/expired token, bad credentials → 401
//! - `NotFound`: missing record, or a record owned by someone else → 404
//! - `Conflict`: duplicate email at signup → 409
//! - `Internal`: unexpected storage failure → 500 (detail logged, never sent)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for the taskdeck service
#[derive(Debug)]
pub enum ApiError {
    /// Request payload failed validation
    Validation(String),

    /// Missing or invalid credentials/token
    Unauthorized(String),

    /// Record does not exist, or belongs to a different owner
    NotFound(String),

    /// Write conflicts with existing state (e.g. duplicate email)
    Conflict(String),

    /// Unexpected failure (storage, serialization). Detail stays server-side.
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::Unauthorized(msg) => write!(f, "{}", msg),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::Conflict(msg) => write!(f, "{}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Internal errors are replaced with a generic message; stack traces and
    /// storage detail must never reach the client.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            ApiError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "internal error while handling request");
        }

        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
