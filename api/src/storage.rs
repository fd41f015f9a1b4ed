//! In-memory chat history store.
//!
//! Process-lifetime only: messages live in a `Vec` behind an async `RwLock`
//! and vanish on restart. No durability is intended.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use composer::ComposedResponse;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation, as stored and returned by `/api/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_response: Option<ComposedResponse>,
}

impl ChatMessage {
    /// A user turn (no structured payload).
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role: Role::User,
            timestamp: Utc::now(),
            structured_response: None,
        }
    }

    /// An assistant turn carrying the composed answer.
    pub fn assistant(
        id: impl Into<String>,
        content: impl Into<String>,
        structured: ComposedResponse,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role: Role::Assistant,
            timestamp: Utc::now(),
            structured_response: Some(structured),
        }
    }
}

/// Append/read/clear store shared across handlers.
#[derive(Debug, Clone, Default)]
pub struct MemStorage {
    inner: Arc<RwLock<Vec<ChatMessage>>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored history in insertion order.
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.inner.read().await.clone()
    }

    /// Appends one message.
    pub async fn save(&self, message: ChatMessage) {
        self.inner.write().await.push(message);
    }

    /// Drops all stored messages.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_read_clear_round_trip() {
        let store = MemStorage::new();
        assert!(store.history().await.is_empty());

        store.save(ChatMessage::user("1", "hello")).await;
        store.save(ChatMessage::user("2", "again")).await;

        let history = store.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "hello");
        assert_eq!(history[0].role, Role::User);

        store.clear().await;
        assert!(store.history().await.is_empty());
    }

    #[test]
    fn user_message_omits_structured_field_in_json() {
        let msg = ChatMessage::user("1", "hi");
        let v = serde_json::to_value(&msg).unwrap();
        assert!(v.get("structured_response").is_none());
        assert_eq!(v["role"], "user");
    }
}
