use composer::ComposedResponse;
use serde::{Deserialize, Serialize};

/// Request payload for /api/chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Natural language question about Dunhuang art and history.
    pub message: String,
    /// Optional language tag ("en", "zh"); unrecognized values fall back to English.
    #[serde(default)]
    pub language: Option<String>,
}

/// Response payload for /api/chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Server-assigned message id (millisecond timestamp).
    pub id: String,
    /// Plain-text mirror of the introduction, for clients that ignore the
    /// structured payload.
    pub content: String,
    /// The fully populated structured answer.
    pub structured_response: ComposedResponse,
}
