// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("Display name must not be empty")]
    EmptyName,

    #[error("Too few usable GPS points to score a run")]
    InsufficientPoints,

    #[error("Email is already registered")]
    EmailTaken,

    // One variant for unknown email and wrong password, so the
    // response never reveals which check failed.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authorization header missing or malformed")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::WeakPassword(_) => (
                StatusCode::BAD_REQUEST,
                "weak_password",
                Some(self.to_string()),
            ),
            AppError::EmptyName => (StatusCode::BAD_REQUEST, "empty_name", None),
            AppError::InsufficientPoints => (StatusCode::BAD_REQUEST, "insufficient_points", None),
            AppError::EmailTaken => (StatusCode::CONFLICT, "email_taken", None),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
            }
            AppError::MissingToken => (StatusCode::UNAUTHORIZED, "missing_token", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
