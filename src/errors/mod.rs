//! Unified error handling for the HTTP surface.
//!
//! Malformed list-endpoint input is never an error here: page and limit are
//! clamped at parse time, so the only failures that reach a response are
//! internal ones, and those are deliberately opaque to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Wire shape for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
            }
        }

        // Internal detail stays in the logs; callers get a fixed message.
        let body = ErrorBody {
            error: "Server error".to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
