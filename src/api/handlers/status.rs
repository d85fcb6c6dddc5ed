use crate::types::StatusResponse;
use axum::Json;

pub const STATUS_MESSAGE: &str = "Met Office Chatbot API is running! Use /chat or /weather.";

/// Liveness probe; no side effects.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: STATUS_MESSAGE.to_string(),
    })
}
