//! Chat domain module.
//!
//! - `message`: `ChatMessage`, `ChatRole`, `Citation`
//! - `transcript`: `ChatTranscript` and the selection helpers used when a
//!   question is about highlighted text

mod message;
mod transcript;

pub use message::{ChatMessage, ChatRole, Citation};
pub use transcript::{ChatTranscript, GREETING};

/// Selections this short (in characters, after trimming) are ignored.
pub const MIN_SELECTION_CHARS: usize = 10;
/// Characters of the selection quoted in the user's message.
pub const SELECTION_QUOTE_CHARS: usize = 100;

/// Returns the trimmed selection if it is long enough to ask about.
pub fn accept_selection(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (trimmed.chars().count() > MIN_SELECTION_CHARS).then(|| trimmed.to_string())
}

/// The text shown as the user's message, quoting the selection if any.
pub fn quote_question(question: &str, selection: Option<&str>) -> String {
    match selection {
        Some(selected) => format!(
            "[About selected text: \"{}...\"]\n\n{}",
            crate::augmentation::truncate_chars(selected, SELECTION_QUOTE_CHARS),
            question
        ),
        None => question.to_string(),
    }
}
