//! Terminal chat frontend for the registration service.
//!
//! This module provides a REPL chat interface built on top of the enlist
//! client library. It maintains two view regions, a transcript and a
//! mirrored collected-info panel, synchronized with the service via one
//! `POST /chat` exchange per user message.
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: View state, the update loop, and the exchange driver
//! - [`render`]: Output rendering abstraction
//! - [`commands`]: Slash command parsing

mod commands;
mod config;
mod render;
mod session;

pub use commands::{ChatCommand, help_text, parse_command, run_command};
pub use config::{ChatArgs, ChatConfig};
pub use render::{PlainTextRenderer, Renderer};
pub use session::{
    APOLOGY_MESSAGE, ChatSession, COMPLETION_MESSAGE, GREETING_MESSAGE, SessionState, ViewState,
};
