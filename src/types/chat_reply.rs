use serde::{Deserialize, Serialize};

use crate::types::CollectedInfo;

/// Response body for `POST /chat`.
///
/// Every reply carries the assistant's text, the full canonical
/// [`CollectedInfo`] snapshot (unmasked; masking is a display concern), and
/// the completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant's reply text.
    pub message: String,

    /// The canonical registration snapshot after this turn.
    pub collected_info: CollectedInfo,

    /// True once every field has been collected.
    pub registration_complete: bool,
}

impl ChatReply {
    /// Create a new `ChatReply`.
    pub fn new(
        message: impl Into<String>,
        collected_info: CollectedInfo,
        registration_complete: bool,
    ) -> Self {
        Self {
            message: message.into(),
            collected_info,
            registration_complete,
        }
    }
}
