//! Tutor chat widget state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use textbook_core::backend::{BackendError, ChatRequest, TextbookBackend};
use textbook_core::chat::{ChatMessage, ChatTranscript, accept_selection, quote_question};

use crate::flight::FlightGuard;

/// What became of a `send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, or another request was still running. Nothing changed.
    Ignored,
    /// The backend answered; `reply` is the appended assistant message.
    Answered { reply: ChatMessage },
    /// The backend failed; `reply` is the appended apology.
    Failed { reply: ChatMessage, error: BackendError },
}

/// One chat widget: transcript, draft input and the pending text selection.
///
/// At most one question is in flight at a time.
pub struct ChatClient {
    backend: Arc<dyn TextbookBackend>,
    transcript: Mutex<ChatTranscript>,
    input: Mutex<String>,
    selection: Mutex<Option<String>>,
    in_flight: AtomicBool,
}

impl ChatClient {
    pub fn new(backend: Arc<dyn TextbookBackend>) -> Self {
        Self {
            backend,
            transcript: Mutex::new(ChatTranscript::new()),
            input: Mutex::new(String::new()),
            selection: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Copy of the transcript so far.
    pub fn transcript(&self) -> ChatTranscript {
        lock(&self.transcript).clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn input(&self) -> String {
        lock(&self.input).clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        *lock(&self.input) = text.into();
    }

    pub fn pending_selection(&self) -> Option<String> {
        lock(&self.selection).clone()
    }

    /// Offers a page selection. Long enough selections replace the pending
    /// one; short ones are ignored and leave it as it was.
    pub fn observe_selection(&self, raw: &str) -> bool {
        match accept_selection(raw) {
            Some(selected) => {
                *lock(&self.selection) = Some(selected);
                true
            }
            None => false,
        }
    }

    pub fn dismiss_selection(&self) {
        *lock(&self.selection) = None;
    }

    /// Sends the current draft.
    pub async fn submit(&self) -> SendOutcome {
        let text = self.input();
        self.send(&text).await
    }

    /// Asks `text`, about the pending selection if there is one.
    pub async fn send(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }
        let Some(_guard) = FlightGuard::try_acquire(&self.in_flight) else {
            tracing::debug!("Chat request already in flight, ignoring send");
            return SendOutcome::Ignored;
        };

        let selected_text = self.pending_selection();
        lock(&self.transcript).push_user(quote_question(text, selected_text.as_deref()));
        lock(&self.input).clear();

        let request = ChatRequest {
            message: text.to_string(),
            selected_text,
        };
        let result = if request.selected_text.is_some() {
            self.backend.chat_selected(&request).await
        } else {
            self.backend.chat(&request).await
        };

        let outcome = match result {
            Ok(response) => {
                let reply = lock(&self.transcript)
                    .push_assistant(response.response, response.sources)
                    .clone();
                SendOutcome::Answered { reply }
            }
            Err(error) => {
                tracing::warn!("Chat request failed: {}", error);
                let apology = format!(
                    "Sorry, I encountered an error. Make sure the backend is running at {}",
                    self.backend.base_url()
                );
                let reply = lock(&self.transcript)
                    .push_assistant(apology, Vec::new())
                    .clone();
                SendOutcome::Failed { reply, error }
            }
        };

        self.dismiss_selection();
        outcome
    }
}

/// Locks `mutex`, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
