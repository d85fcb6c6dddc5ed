use crate::{
    AppState,
    memory::ConversationStore,
    types::{AppError, ChatRequest, ChatResponse, Message, Result},
    weather::extract_weather_intent,
};
use axum::{Json, extract::State, extract::rejection::JsonRejection};

/// Chat with the assistant
///
/// Weather questions naming a city are answered with live forecast data
/// spliced into the system prompt. When that lookup fails the failure text is
/// returned as the reply and the completion service is not called.
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let Json(payload) = payload.map_err(super::invalid_body)?;

    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::InvalidRequest("Message is required".to_string()));
    }

    let session = ConversationStore::session_key(payload.session_id.as_deref()).to_string();
    let intent = extract_weather_intent(message);

    let mut weather = None;
    if let (true, Some(city)) = (intent.is_weather_query, intent.city.as_deref()) {
        match state.weather.current_weather(city).await {
            Ok(report) => weather = Some(report),
            Err(e) => {
                tracing::info!(session = %session, city = %city, "Answering with lookup failure: {}", e);
                let reply = e.message().to_string();
                state.conversations.append_many(
                    &session,
                    [Message::user(message), Message::assistant(reply.clone())],
                );
                return Ok(Json(ChatResponse {
                    response: reply,
                    session_id: payload.session_id,
                }));
            }
        }
    }

    let history = state
        .conversations
        .record_and_snapshot(&session, Message::user(message));

    let reply = state
        .gateway
        .reply(&history, weather.as_ref())
        .await
        .map_err(|e| {
            tracing::warn!(session = %session, "Completion failed: {}", e);
            AppError::Upstream(e.message().to_string())
        })?;

    state
        .conversations
        .append(&session, Message::assistant(reply.clone()));

    Ok(Json(ChatResponse {
        response: reply,
        session_id: payload.session_id,
    }))
}
