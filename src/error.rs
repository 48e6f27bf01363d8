// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid username: expected 3-30 letters, digits or underscores")]
    InvalidIdentifier,

    #[error("User not found upstream")]
    UpstreamNotFound,

    #[error("Upstream rate limit exceeded, try again later")]
    UpstreamRateLimited,

    #[error("Upstream returned HTTP {0}")]
    UpstreamError(u16),

    #[error("Upstream request timed out")]
    UpstreamTimeout,

    #[error("Upstream service unreachable")]
    UpstreamUnreachable,

    #[error("Upstream returned a malformed body: {0}")]
    MalformedUpstreamBody(String),

    #[error("No profile data for this user")]
    SubjectNotFound,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidIdentifier => (StatusCode::BAD_REQUEST, "invalid_username"),
            AppError::UpstreamNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
            AppError::UpstreamRateLimited => (StatusCode::TOO_MANY_REQUESTS, "rate_limited"),
            AppError::UpstreamError(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            AppError::UpstreamTimeout => (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout"),
            AppError::UpstreamUnreachable => {
                (StatusCode::SERVICE_UNAVAILABLE, "upstream_unreachable")
            }
            AppError::MalformedUpstreamBody(_) => (StatusCode::BAD_GATEWAY, "malformed_upstream"),
            AppError::SubjectNotFound => (StatusCode::NOT_FOUND, "no_profile_data"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let error = match &self {
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                "Internal server error".to_string()
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "Internal server error");
                "Internal server error".to_string()
            }
            AppError::MalformedUpstreamBody(msg) => {
                tracing::warn!(error = %msg, "Malformed upstream body");
                "Upstream returned an unreadable response".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error, code })).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
