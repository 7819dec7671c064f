use serde::{Deserialize, Serialize};

/// Role type for a chat-completions message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionRole {
    /// System role.
    System,

    /// User role.
    User,

    /// Assistant role.
    Assistant,
}

/// A single message in a chat-completions exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    /// The role of the message.
    pub role: CompletionRole,

    /// The content of the message.
    pub content: String,
}

impl CompletionMessage {
    /// Create a new `CompletionMessage` with the given role and content.
    pub fn new(role: CompletionRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(CompletionRole::System, content)
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(CompletionRole::User, content)
    }
}

/// Request body for an OpenAI-compatible `chat/completions` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to sample from.
    pub model: String,

    /// The conversation so far.
    pub messages: Vec<CompletionMessage>,

    /// The sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a new `CompletionRequest`.
    pub fn new(model: impl Into<String>, messages: Vec<CompletionMessage>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
        }
    }
}

/// One sampled choice in a chat-completions response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionChoice {
    /// The sampled message.
    pub message: CompletionMessage,
}

/// Response body for an OpenAI-compatible `chat/completions` call.
///
/// Only the fields the registration handler consumes are modeled; unknown
/// fields in the response are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The sampled choices.
    pub choices: Vec<CompletionChoice>,
}

impl CompletionResponse {
    /// Returns the content of the first choice, if any.
    pub fn into_first_content(self) -> Option<String> {
        self.choices.into_iter().next().map(|c| c.message.content)
    }
}
