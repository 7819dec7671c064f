//! Interactive terminal client for the registration service.
//!
//! This binary provides a REPL chat interface: it shows the conversation
//! transcript, mirrors the collected registration info after every reply,
//! and exits once registration completes.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage against a local service
//! enlist-chat
//!
//! # Point at a different service
//! enlist-chat --url http://registration.example.com/
//!
//! # Disable colors (useful for piping output)
//! enlist-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/info` - Show the collected registration info
//! - `/help` - Show available commands
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use enlist::ChatClient;
use enlist::chat::{
    ChatArgs, ChatConfig, ChatSession, PlainTextRenderer, Renderer, parse_command, run_command,
};

/// Main entry point for the enlist-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("enlist-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    let client = ChatClient::with_options(Some(config.base_url.clone()), Some(config.timeout))?;
    let mut session = ChatSession::new(client);
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Registration chat ({})", config.base_url);
    println!("Type /help for commands, /quit to exit\n");
    session.begin(&mut renderer);

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    if run_command(cmd, session.view(), &mut renderer) {
                        break;
                    }
                    continue;
                }

                // Regular message - one exchange with the service
                session.send(line, &mut renderer).await;

                if session.is_completed() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!();
                renderer.print_info("Goodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}
