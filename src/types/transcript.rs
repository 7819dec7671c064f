use serde::{Deserialize, Serialize};

/// The originator of a transcript message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The human typing into the chat.
    User,

    /// The registration assistant persona.
    Bot,
}

/// A single entry in the chat transcript.
///
/// Messages are immutable once created and are only ever appended to the
/// transcript, never mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// The displayed text.
    pub text: String,

    /// Who produced the message.
    pub sender: Sender,
}

impl TranscriptMessage {
    /// Create a new `TranscriptMessage`.
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
        }
    }

    /// Create a new user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    /// Create a new bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }
}
