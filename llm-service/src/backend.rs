//! Provider abstraction consumed by callers that orchestrate completions.
//!
//! The trait is object-safe so an `Arc<dyn CompletionBackend>` can be handed
//! to request handlers, and so tests can substitute a scripted fake provider.

use async_trait::async_trait;

use crate::{config::CompletionOptions, error::LlmError};

/// A single-operation text-completion capability.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Sends `prompt` to the provider and returns the raw assistant text.
    ///
    /// The returned string is untrusted: when `opts.json_object` is set the
    /// provider *should* answer with valid JSON, but callers must be prepared
    /// for malformed output.
    ///
    /// # Errors
    /// Returns [`LlmError`] on transport failure, non-2xx status, undecodable
    /// payload, or an empty completion.
    async fn complete(&self, prompt: &str, opts: &CompletionOptions) -> Result<String, LlmError>;
}
