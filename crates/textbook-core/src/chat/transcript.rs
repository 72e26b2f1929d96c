use super::message::{ChatMessage, ChatRole, Citation};

/// Greeting the tutor opens every transcript with.
pub const GREETING: &str = "Hi! I'm your AI tutor for this Physical AI textbook. Ask me anything about \
robotics, AI, or the content in this book. You can also select text on the page and ask me about it!";

/// Ordered, append-only list of messages for one chat widget.
///
/// Not persisted: a new widget starts over with just the greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    /// A transcript seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING, Vec::new())],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::user(content))
    }

    pub fn push_assistant(
        &mut self,
        content: impl Into<String>,
        sources: Vec<Citation>,
    ) -> &ChatMessage {
        self.push(ChatMessage::assistant(content, sources))
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages written by `role`.
    pub fn count(&self, role: ChatRole) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}
