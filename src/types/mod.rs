//! Data types for the enlist wire contracts.
//!
//! The `/chat` contract between the terminal client and the registration
//! service lives in [`chat_request`] and [`chat_reply`]; the transcript types
//! in [`transcript`]; the registration snapshot in [`collected_info`]; and the
//! upstream chat-completions wire types in [`completion`].

mod chat_reply;
mod chat_request;
mod collected_info;
mod completion;
mod transcript;

pub use chat_reply::ChatReply;
pub use chat_request::ChatRequest;
pub use collected_info::{CollectedInfo, MASKED_PASSWORD};
pub use completion::{
    CompletionChoice, CompletionMessage, CompletionRequest, CompletionResponse, CompletionRole,
};
pub use transcript::{Sender, TranscriptMessage};
