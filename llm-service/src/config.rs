//! Provider configuration loaded strictly from environment variables.
//!
//! One provider profile is supported: an OpenAI-compatible chat endpoint.
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY` (or legacy `OPENAI_API_KEY_ENV_VAR`) — mandatory
//! - `OPENAI_URL`        — API base, default `https://api.openai.com`
//! - `OPENAI_MODEL`      — model id, default `gpt-4o`
//! - `LLM_TIMEOUT_SECS`  — optional per-request timeout (u64, default 60)

use crate::error::{ConfigError, LlmError, env_opt_u64, validate_http_endpoint};

/// Static connection settings for a chat-completion provider.
///
/// Sampling parameters (temperature, token ceilings) are deliberately *not*
/// part of this struct: callers pass them per request via
/// [`CompletionOptions`], since each generated section uses its own values.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Model identifier string (e.g., `"gpt-4o"`).
    pub model: String,

    /// API base URL (e.g., `https://api.openai.com`).
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    /// Builds the OpenAI config from environment variables.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`] if no API key variable is set
    /// - [`ConfigError::InvalidFormat`] if `OPENAI_URL` has no http scheme
    /// - [`ConfigError::InvalidNumber`] if `LLM_TIMEOUT_SECS` is not a u64
    pub fn openai_from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                std::env::var("OPENAI_API_KEY_ENV_VAR")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
            })
            .ok_or(ConfigError::MissingVar(
                "OPENAI_API_KEY or OPENAI_API_KEY_ENV_VAR",
            ))?;

        let endpoint = std::env::var("OPENAI_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "https://api.openai.com".to_string());
        validate_http_endpoint("OPENAI_URL", &endpoint)?;

        let model = std::env::var("OPENAI_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "gpt-4o".to_string());

        let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?;

        Ok(Self {
            model,
            endpoint,
            api_key: Some(api_key),
            timeout_secs,
        })
    }
}

/// Per-call generation constraints.
///
/// Every field maps 1:1 to the upstream request body; `json_object` switches
/// on the provider's machine-parsable JSON mode
/// (`response_format: {"type": "json_object"}`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompletionOptions {
    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Ask the provider to emit a single valid JSON object.
    pub json_object: bool,
}

impl CompletionOptions {
    /// Plain-prose options with a token ceiling and temperature.
    pub fn prose(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            temperature: Some(temperature),
            json_object: false,
        }
    }

    /// JSON-object options with a token ceiling and temperature.
    pub fn json(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            temperature: Some(temperature),
            json_object: true,
        }
    }
}
