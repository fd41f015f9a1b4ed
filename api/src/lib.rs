//! HTTP layer for the Amber AI Dunhuang chat backend.
//!
//! Routes:
//! - `POST /api/chat`     — compose a structured cultural answer
//! - `GET  /api/health`   — static liveness payload
//! - `GET  /api/history`  — in-memory chat history
//! - `DELETE /api/history` — clear the history

use std::{env, sync::Arc};

pub mod core;
pub mod error_handler;
pub mod routes;
pub mod storage;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::info;

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    routes::{
        chat::chat_route::chat,
        health_route::health,
        history_route::{clear_history, history},
    },
};

/// Builds the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/health", get(health))
        .route("/api/history", get(history).delete(clear_history))
        .with_state(state)
}

/// Binds the listener and serves until Ctrl+C.
///
/// # Errors
/// Returns [`AppError::Config`] for invalid provider settings,
/// [`AppError::Bind`]/[`AppError::Server`] for socket failures.
pub async fn start() -> Result<(), AppError> {
    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let addr = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".into());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AppError::Bind)?;

    info!(%addr, "Amber AI backend listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
