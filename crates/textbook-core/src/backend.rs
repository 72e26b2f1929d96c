//! Backend service trait and its wire types.
//!
//! The textbook backend exposes personalization, translation and a
//! retrieval-augmented chat. Request and response bodies are JSON with
//! snake_case keys.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::Citation;
use crate::profile::{ExperienceLevel, PersonalizationHints};

/// Errors returned by a [`TextbookBackend`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request never produced an HTTP response (connection refused, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },

    /// The response body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizeRequest {
    pub content: String,
    pub experience_level: ExperienceLevel,
    pub background: String,
    pub interests: Vec<String>,
    pub preferred_examples: String,
}

impl PersonalizeRequest {
    pub fn new(content: impl Into<String>, hints: PersonalizationHints) -> Self {
        Self {
            content: content.into(),
            experience_level: hints.experience_level,
            background: hints.background,
            interests: hints.interests,
            preferred_examples: hints.preferred_examples,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizeResponse {
    pub personalized_content: String,
    #[serde(default)]
    pub user_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub content: String,
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_content: String,
    #[serde(default)]
    pub source_language: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub sources: Vec<Citation>,
}

/// The remote textbook backend.
#[async_trait]
pub trait TextbookBackend: Send + Sync {
    /// Rewrites chapter text for the reader's level and background.
    async fn personalize(&self, request: &PersonalizeRequest) -> BackendResult<PersonalizeResponse>;

    /// Translates chapter text into `request.target_language`.
    async fn translate(&self, request: &TranslateRequest) -> BackendResult<TranslateResponse>;

    /// Answers a free-form question.
    async fn chat(&self, request: &ChatRequest) -> BackendResult<ChatResponse>;

    /// Answers a question about `request.selected_text`.
    async fn chat_selected(&self, request: &ChatRequest) -> BackendResult<ChatResponse>;

    /// Liveness probe.
    async fn health(&self) -> BackendResult<()>;

    /// Base URL the backend is reached at, shown in error messages.
    fn base_url(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let with_detail = BackendError::Status {
            status: 500,
            detail: Some("Qdrant unavailable".to_string()),
        };
        assert_eq!(with_detail.to_string(), "HTTP 500: Qdrant unavailable");

        let bare = BackendError::Status {
            status: 404,
            detail: None,
        };
        assert_eq!(bare.to_string(), "HTTP 404");
        assert_eq!(bare.status(), Some(404));
    }

    #[test]
    fn test_personalize_request_wire_shape() {
        let request = PersonalizeRequest::new("Text", PersonalizationHints::anonymous());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "content": "Text",
                "experience_level": "beginner",
                "background": "other",
                "interests": ["robotics", "ai"],
                "preferred_examples": "python"
            })
        );
    }

    #[test]
    fn test_chat_request_omits_missing_selection() {
        let plain = ChatRequest {
            message: "What is SLAM?".to_string(),
            selected_text: None,
        };
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            serde_json::json!({ "message": "What is SLAM?" })
        );
    }

    #[test]
    fn test_chat_response_sources_default_empty() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"response": "Simultaneous localization and mapping."}"#)
                .unwrap();
        assert!(response.sources.is_empty());
    }
}
