//! API request handlers.

/// Chat relay handler.
pub mod chat;
/// Service status handler.
pub mod status;
/// Direct weather lookup handler.
pub mod weather;

use crate::types::AppError;
use axum::extract::rejection::JsonRejection;

/// Malformed or missing JSON bodies are client errors with a JSON error body.
pub(crate) fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::InvalidRequest(format!("Invalid request body: {}", rejection.body_text()))
}
