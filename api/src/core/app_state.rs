use std::sync::Arc;

use composer::ResponseComposer;
use llm_service::{OpenAiClient, ProviderConfig};

use crate::{error_handler::AppError, storage::MemStorage};

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// The response-generation pipeline.
    pub composer: ResponseComposer,
    /// Ephemeral chat history.
    pub storage: MemStorage,
}

impl AppState {
    /// Builds shared state from environment variables (provider credentials,
    /// endpoint, model).
    ///
    /// # Errors
    /// Returns [`AppError::Config`] when the provider configuration is
    /// missing or invalid.
    pub fn from_env() -> Result<Self, AppError> {
        let cfg = ProviderConfig::openai_from_env()?;
        let client = OpenAiClient::new(cfg)?;
        Ok(Self::new(ResponseComposer::new(Arc::new(client))))
    }

    /// Assembles state around an already-built composer (used by tests with
    /// a fake backend).
    pub fn new(composer: ResponseComposer) -> Self {
        Self {
            composer,
            storage: MemStorage::new(),
        }
    }
}
