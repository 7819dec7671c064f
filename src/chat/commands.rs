//! Slash command parsing for the chat frontend.
//!
//! Commands starting with `/` control the local session and are never sent
//! to the registration service.

use super::render::Renderer;
use super::session::ViewState;

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Display the current collected-info panel.
    Info,

    /// Display help information.
    Help,

    /// Exit the chat.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be sent as a regular message.
///
/// # Examples
///
/// ```
/// # use enlist::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/info").is_some());
/// assert!(parse_command("my name is Alice").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();

    let result = match command.as_str() {
        "info" | "collected" => ChatCommand::Info,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Executes a parsed command, writing its output through the renderer.
///
/// Returns `true` when the command asks the caller to exit the session.
pub fn run_command(cmd: ChatCommand, view: &ViewState, renderer: &mut dyn Renderer) -> bool {
    match cmd {
        ChatCommand::Quit => {
            renderer.print_info("Goodbye!");
            true
        }
        ChatCommand::Info => {
            renderer.print_info_panel(&view.info_panel());
            false
        }
        ChatCommand::Help => {
            renderer.print_info(help_text());
            false
        }
        ChatCommand::Invalid(message) => {
            renderer.print_error(&message);
            false
        }
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /info                  Show the collected registration info
  /help                  Show this help message
  /quit                  Exit the chat"#
}
