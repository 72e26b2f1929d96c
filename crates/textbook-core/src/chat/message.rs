//! Chat message types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// An excerpt the assistant based its answer on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub text: String,
    pub source: String,
}

/// A single message in the tutor transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Citation>,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content.into(), Vec::new())
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<Citation>) -> Self {
        Self::new(ChatRole::Assistant, content.into(), sources)
    }

    fn new(role: ChatRole, content: String, sources: Vec<Citation>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            sources,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Footer line listing where the answer came from, e.g. `"Sources: ch1, ch2"`.
    pub fn sources_label(&self) -> Option<String> {
        if self.sources.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.sources.iter().map(|s| s.source.as_str()).collect();
        Some(format!("Sources: {}", names.join(", ")))
    }
}
