//! Typed error for the composer crate.
//!
//! Only the introduction step can fail the whole pipeline; every other
//! section degrades to its fallback value instead of erroring.

use llm_service::LlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposerError {
    /// The introduction call failed; nothing downstream can be generated.
    #[error("AI generation service unavailable: {source}")]
    Upstream {
        #[source]
        source: LlmError,
    },

    /// The introduction call succeeded but returned no usable text.
    #[error("AI generation service returned an empty introduction")]
    EmptyIntroduction,
}
