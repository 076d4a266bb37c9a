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
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Same user already logged a task with this title on this date.
    #[error("{}", AppError::DUPLICATE_TASK_MESSAGE)]
    DuplicateTask,

    #[error("Page {page} is outside 1..={total_pages}")]
    PageOutOfRange { page: usize, total_pages: usize },

    #[error("No matching records to export")]
    NothingToExport,

    /// A read from the store failed; carries the user-facing message.
    #[error("{0}")]
    Fetch(&'static str),

    /// A create/update/delete failed; carries the user-facing message.
    #[error("{0}")]
    Write(&'static str),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const DUPLICATE_TASK_MESSAGE: &'static str =
        "You already have a task with this title today.";

    /// Convert a store error into a page-level fetch failure.
    ///
    /// Errors that already carry a user-facing meaning pass through.
    pub fn fetch_failure(self, message: &'static str) -> Self {
        match self {
            AppError::Database(detail) => {
                tracing::error!(error = %detail, user_message = message, "Fetch failed");
                AppError::Fetch(message)
            }
            other => other,
        }
    }

    /// Convert a store error into an inline write failure.
    pub fn write_failure(self, message: &'static str) -> Self {
        match self {
            AppError::Database(detail) => {
                tracing::error!(error = %detail, user_message = message, "Write failed");
                AppError::Write(message)
            }
            other => other,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();

        AppError::BadRequest(messages.join("; "))
    }
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
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::DuplicateTask => (
                StatusCode::CONFLICT,
                "duplicate_task",
                Some(Self::DUPLICATE_TASK_MESSAGE.to_string()),
            ),
            AppError::PageOutOfRange { .. } => (
                StatusCode::BAD_REQUEST,
                "page_out_of_range",
                Some(self.to_string()),
            ),
            AppError::NothingToExport => (
                StatusCode::CONFLICT,
                "nothing_to_export",
                Some(self.to_string()),
            ),
            AppError::Fetch(msg) => (StatusCode::BAD_GATEWAY, "fetch_failed", Some(msg.to_string())),
            AppError::Write(msg) => (StatusCode::BAD_GATEWAY, "write_failed", Some(msg.to_string())),
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
