//! Output rendering for the chat frontend.
//!
//! This module provides a trait-based rendering abstraction so the session
//! loop can be exercised in tests without a terminal. The default
//! implementation writes to stdout with optional ANSI styling.

use std::io::{self, Stdout, Write};

use crate::types::Sender;

/// ANSI escape code for dim text (used for the info panel).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for bot messages).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// Trait for rendering chat output.
///
/// The session appends transcript messages and replaces the collected-info
/// panel through this trait; implementations decide how the two view regions
/// appear.
pub trait Renderer: Send {
    /// Render a newly appended transcript message.
    fn print_message(&mut self, sender: Sender, text: &str);

    /// Replace the collected-info panel with freshly serialized contents.
    fn print_info_panel(&mut self, panel: &str);

    /// Print an informational message outside the transcript.
    fn print_info(&mut self, info: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout to ensure immediate display.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, sender: Sender, text: &str) {
        match sender {
            Sender::User => println!("You: {text}"),
            Sender::Bot => {
                if self.use_color {
                    println!("{ANSI_CYAN}Bot:{ANSI_RESET} {text}");
                } else {
                    println!("Bot: {text}");
                }
            }
        }
        self.flush();
    }

    fn print_info_panel(&mut self, panel: &str) {
        if self.use_color {
            println!("{ANSI_DIM}collected info:");
            for line in panel.lines() {
                println!("  {line}");
            }
            print!("{ANSI_RESET}");
        } else {
            println!("collected info:");
            for line in panel.lines() {
                println!("  {line}");
            }
        }
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        if self.use_color {
            eprintln!("{ANSI_RED}Error:{ANSI_RESET} {error}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
