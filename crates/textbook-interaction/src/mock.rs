//! In-memory backend for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use textbook_core::backend::{
    BackendError, BackendResult, ChatRequest, ChatResponse, PersonalizeRequest,
    PersonalizeResponse, TextbookBackend, TranslateRequest, TranslateResponse,
};
use textbook_core::chat::Citation;
use tokio::sync::Notify;

pub const MOCK_URL: &str = "http://localhost:8000";

/// Which endpoint a recorded call went to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Personalize(PersonalizeRequest),
    Translate(TranslateRequest),
    Chat(ChatRequest),
    ChatSelected(ChatRequest),
}

/// Scripted backend. Every endpoint succeeds unless a failure is set.
/// With a gate, calls wait for `gate.notify_one()` before answering.
#[derive(Default)]
pub struct MockBackend {
    failure: Option<BackendError>,
    gate: Option<Arc<Notify>>,
    sources: Vec<Citation>,
    calls: Mutex<Vec<Call>>,
}

impl MockBackend {
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self::failing_with(BackendError::Transport("connection refused".to_string()))
    }

    pub fn failing_with(error: BackendError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn with_sources(mut self, sources: Vec<Citation>) -> Self {
        self.sources = sources;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) -> BackendResult<()> {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.fail()
    }

    fn fail(&self) -> BackendResult<()> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TextbookBackend for MockBackend {
    async fn personalize(&self, request: &PersonalizeRequest) -> BackendResult<PersonalizeResponse> {
        self.record(Call::Personalize(request.clone())).await?;
        Ok(PersonalizeResponse {
            personalized_content: format!("[{}] {}", request.experience_level, request.content),
            user_level: Some(request.experience_level.to_string()),
        })
    }

    async fn translate(&self, request: &TranslateRequest) -> BackendResult<TranslateResponse> {
        self.record(Call::Translate(request.clone())).await?;
        Ok(TranslateResponse {
            translated_content: format!("ترجمہ: {}", request.content),
            source_language: Some("english".to_string()),
            target_language: Some(request.target_language.clone()),
        })
    }

    async fn chat(&self, request: &ChatRequest) -> BackendResult<ChatResponse> {
        self.record(Call::Chat(request.clone())).await?;
        Ok(ChatResponse {
            response: format!("Answer to: {}", request.message),
            sources: self.sources.clone(),
        })
    }

    async fn chat_selected(&self, request: &ChatRequest) -> BackendResult<ChatResponse> {
        self.record(Call::ChatSelected(request.clone())).await?;
        Ok(ChatResponse {
            response: format!("Answer about selection: {}", request.message),
            sources: self.sources.clone(),
        })
    }

    async fn health(&self) -> BackendResult<()> {
        self.fail()
    }

    fn base_url(&self) -> &str {
        MOCK_URL
    }
}
