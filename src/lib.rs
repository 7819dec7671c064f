// Public modules
pub mod assistant;
pub mod chat;
pub mod client;
pub mod error;
pub mod handler;
pub mod observability;
pub mod server;
pub mod types;

// Re-exports
pub use assistant::{Assistant, OpenAiAssistant};
pub use client::ChatClient;
pub use error::{Error, Result};
pub use handler::RegistrationHandler;
pub use types::*;
