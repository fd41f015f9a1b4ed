//! GET/DELETE /api/history — read or clear the in-memory chat history.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{core::app_state::AppState, storage::ChatMessage};

/// Handler: GET /api/history
pub async fn history(State(state): State<Arc<AppState>>) -> Json<Vec<ChatMessage>> {
    Json(state.storage.history().await)
}

/// Handler: DELETE /api/history
pub async fn clear_history(State(state): State<Arc<AppState>>) -> StatusCode {
    state.storage.clear().await;
    StatusCode::NO_CONTENT
}
