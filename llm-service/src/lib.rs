//! Shared LLM client for an OpenAI-compatible chat-completions provider.
//!
//! - Construct [`OpenAiClient`] once from env config, wrap in `Arc`, and pass
//!   clones to dependents.
//! - Per-call sampling (`temperature`, `max_tokens`, JSON mode) travels in
//!   [`CompletionOptions`]; the config holds only connection settings.
//! - The [`CompletionBackend`] trait is the seam callers depend on, so tests
//!   can swap in a scripted fake provider.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_service::{CompletionBackend, CompletionOptions, OpenAiClient, ProviderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), llm_service::LlmError> {
//!     let cfg = ProviderConfig::openai_from_env()?;
//!     let client = Arc::new(OpenAiClient::new(cfg)?);
//!
//!     let text = client
//!         .complete("Say hello", &CompletionOptions::prose(64, 0.7))
//!         .await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod openai;
pub mod telemetry;

pub use backend::CompletionBackend;
pub use config::{CompletionOptions, ProviderConfig};
pub use error::{ConfigError, LlmError, Provider, ProviderError, ProviderErrorKind};
pub use openai::OpenAiClient;
