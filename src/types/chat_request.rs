use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The raw user message.
    pub message: String,
}

impl ChatRequest {
    /// Create a new `ChatRequest` with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_message_object() {
        let req = ChatRequest::new("Alice");
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"message":"Alice"}"#
        );
    }
}
