//! HttpBackend - REST client for the textbook backend.
//!
//! Talks to the FastAPI service that serves personalization, translation and
//! the RAG tutor:
//! - `POST /api/personalize`
//! - `POST /api/translate`
//! - `POST /api/chat` and `POST /api/chat/selected`
//! - `GET /health`

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use textbook_core::backend::{
    BackendError, BackendResult, ChatRequest, ChatResponse, PersonalizeRequest,
    PersonalizeResponse, TextbookBackend, TranslateRequest, TranslateResponse,
};
use textbook_core::config::BackendEndpoint;

/// [`TextbookBackend`] over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: BackendEndpoint,
}

impl HttpBackend {
    pub fn new(endpoint: BackendEndpoint) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> BackendResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint.url(path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(self.endpoint.timeout())
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("POST {path}: {e}")))?;

        decode(response).await
    }
}

/// Turns a response into `R`, or into a `Status` error carrying the FastAPI
/// `detail` when the body has one.
async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> BackendResult<R> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Status {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    response
        .json::<R>()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

/// Extracts `detail` from a FastAPI error body.
///
/// Validation errors carry a list rather than a string; those are passed on
/// as compact JSON.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl TextbookBackend for HttpBackend {
    async fn personalize(&self, request: &PersonalizeRequest) -> BackendResult<PersonalizeResponse> {
        self.post_json("/api/personalize", request).await
    }

    async fn translate(&self, request: &TranslateRequest) -> BackendResult<TranslateResponse> {
        self.post_json("/api/translate", request).await
    }

    async fn chat(&self, request: &ChatRequest) -> BackendResult<ChatResponse> {
        self.post_json("/api/chat", request).await
    }

    async fn chat_selected(&self, request: &ChatRequest) -> BackendResult<ChatResponse> {
        self.post_json("/api/chat/selected", request).await
    }

    async fn health(&self) -> BackendResult<()> {
        let url = self.endpoint.url("/health");
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.endpoint.timeout())
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("GET /health: {e}")))?;

        let _: serde_json::Value = decode(response).await?;
        Ok(())
    }

    fn base_url(&self) -> &str {
        self.endpoint.base_url()
    }
}
