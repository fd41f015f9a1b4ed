//! POST /api/chat — composes a structured Dunhuang answer.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use composer::Language;
use tracing::info;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::chat::chat_request::{ChatRequest, ChatResponse},
    storage::ChatMessage,
};

/// Handler: POST /api/chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/api/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"What is the Library Cave discovery?","language":"en"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    // Malformed bodies become a 400 with the shared {error, message} shape.
    let Json(body) = body?;
    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message cannot be empty".into()));
    }
    let language = Language::parse(body.language.as_deref());

    // Upstream failure propagates as 503; partial degradation stays inside
    // the composed answer.
    let structured = state.composer.compose(message, language).await?;

    let id = Utc::now().timestamp_millis().to_string();
    info!(id = %id, ?language, "chat response composed");

    state
        .storage
        .save(ChatMessage::user(format!("{id}-user"), message))
        .await;
    state
        .storage
        .save(ChatMessage::assistant(
            id.clone(),
            structured.introduction.clone(),
            structured.clone(),
        ))
        .await;

    Ok(Json(ChatResponse {
        id,
        content: structured.introduction.clone(),
        structured_response: structured,
    }))
}
