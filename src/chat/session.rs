//! View state and the message/state synchronization loop.
//!
//! The two mutable view regions of the chat interface, the transcript and the
//! collected-info panel, live in an explicit [`ViewState`] so the update
//! logic can be unit-tested without a terminal. [`ChatSession`] pairs a
//! `ViewState` with a [`ChatClient`] and drives one request/response exchange
//! per user message.

use crate::chat::render::Renderer;
use crate::client::ChatClient;
use crate::types::{ChatReply, CollectedInfo, Sender, TranscriptMessage};

/// Opening message from the bot persona.
pub const GREETING_MESSAGE: &str =
    "Hi! I'm here to help you register. Could you please tell me your name?";

/// Appended once the service reports the registration complete.
pub const COMPLETION_MESSAGE: &str =
    "Registration completed successfully! Thank you for signing up.";

/// The single user-visible text every failed exchange collapses to.
pub const APOLOGY_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

/// Interaction lifecycle of the chat.
///
/// `Completed` is terminal: input is disabled and no further transitions
/// occur. A failed exchange does not change state; the session stays
/// `Active` and the user may retry by resending.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Input is enabled and messages are exchanged.
    Active,

    /// Registration finished; input is permanently disabled.
    Completed,
}

/// The client-side view of the conversation.
///
/// Holds the append-only transcript, the latest canonical [`CollectedInfo`]
/// snapshot, and the lifecycle state. All updates flow through the three
/// operations [`submit`](ViewState::submit),
/// [`apply_reply`](ViewState::apply_reply) and
/// [`apply_failure`](ViewState::apply_failure).
#[derive(Debug, Clone)]
pub struct ViewState {
    transcript: Vec<TranscriptMessage>,
    collected: CollectedInfo,
    state: SessionState,
}

impl ViewState {
    /// Creates the initial view: the bot greeting and an all-absent
    /// snapshot.
    pub fn new() -> Self {
        Self {
            transcript: vec![TranscriptMessage::bot(GREETING_MESSAGE)],
            collected: CollectedInfo::new(),
            state: SessionState::Active,
        }
    }

    /// Returns the transcript.
    pub fn transcript(&self) -> &[TranscriptMessage] {
        &self.transcript
    }

    /// Returns the canonical (unmasked) snapshot.
    pub fn collected_info(&self) -> &CollectedInfo {
        &self.collected
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns true while input and send controls are enabled.
    pub fn input_enabled(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Accepts raw input from the input control.
    ///
    /// Empty and whitespace-only input is a no-op, as is any input after
    /// completion: no transcript entry is created and `None` signals that no
    /// exchange should happen. Otherwise the trimmed text is appended as the
    /// optimistic user echo and returned for sending.
    pub fn submit(&mut self, raw: &str) -> Option<String> {
        if !self.input_enabled() {
            return None;
        }
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        self.transcript.push(TranscriptMessage::user(text));
        Some(text.to_string())
    }

    /// Applies a successful reply: appends the bot message and replaces the
    /// snapshot wholesale. On `registration_complete` the fixed completion
    /// message is appended as well and the state becomes terminal.
    ///
    /// Returns the number of transcript messages appended.
    pub fn apply_reply(&mut self, reply: ChatReply) -> usize {
        self.transcript.push(TranscriptMessage::bot(reply.message));
        self.collected = reply.collected_info;
        if reply.registration_complete {
            self.transcript.push(TranscriptMessage::bot(COMPLETION_MESSAGE));
            self.state = SessionState::Completed;
            2
        } else {
            1
        }
    }

    /// Applies a failed exchange: appends the fixed apology. The optimistic
    /// echo is not rolled back and the state stays `Active`.
    pub fn apply_failure(&mut self) {
        self.transcript.push(TranscriptMessage::bot(APOLOGY_MESSAGE));
    }

    /// Serializes the masked snapshot for the collected-info panel.
    pub fn info_panel(&self) -> String {
        serde_json::to_string_pretty(&self.collected.masked())
            .unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// A chat session: view state plus the transport to the service.
pub struct ChatSession {
    client: ChatClient,
    view: ViewState,
}

impl ChatSession {
    /// Creates a new session over the given transport.
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            view: ViewState::new(),
        }
    }

    /// Returns the view state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Returns true once registration completed and input is disabled.
    pub fn is_completed(&self) -> bool {
        !self.view.input_enabled()
    }

    /// Renders the initial greeting and the empty collected-info panel.
    pub fn begin(&mut self, renderer: &mut dyn Renderer) {
        for msg in self.view.transcript() {
            renderer.print_message(msg.sender, &msg.text);
        }
        renderer.print_info_panel(&self.view.info_panel());
    }

    /// Sends one user message through the service and updates both view
    /// regions.
    ///
    /// The user echo is rendered before the exchange resolves. Every failure
    /// kind (connect error, non-success status, malformed body) collapses to
    /// the fixed apology; nothing is propagated beyond it, which is the
    /// entire error-handling policy of the frontend.
    pub async fn send(&mut self, input: &str, renderer: &mut dyn Renderer) {
        let Some(text) = self.view.submit(input) else {
            return;
        };
        if let Some(echo) = self.view.transcript().last() {
            renderer.print_message(echo.sender, &echo.text);
        }

        match self.client.send(&text).await {
            Ok(reply) => {
                let appended = self.view.apply_reply(reply);
                let start = self.view.transcript().len() - appended;
                for msg in &self.view.transcript()[start..] {
                    renderer.print_message(msg.sender, &msg.text);
                }
                renderer.print_info_panel(&self.view.info_panel());
            }
            Err(_) => {
                self.view.apply_failure();
                renderer.print_message(Sender::Bot, APOLOGY_MESSAGE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MASKED_PASSWORD;

    fn reply(message: &str, collected: CollectedInfo, complete: bool) -> ChatReply {
        ChatReply::new(message, collected, complete)
    }

    #[test]
    fn initial_view_has_greeting_and_empty_snapshot() {
        let view = ViewState::new();
        assert_eq!(view.transcript().len(), 1);
        assert_eq!(view.transcript()[0], TranscriptMessage::bot(GREETING_MESSAGE));
        assert!(view.input_enabled());
        assert!(!view.collected_info().is_complete());
    }

    #[test]
    fn empty_submit_is_a_no_op() {
        let mut view = ViewState::new();
        assert!(view.submit("").is_none());
        assert!(view.submit("   \t  ").is_none());
        assert_eq!(view.transcript().len(), 1);
    }

    #[test]
    fn submit_appends_exactly_one_echo() {
        let mut view = ViewState::new();
        let sent = view.submit("  Alice  ").unwrap();
        assert_eq!(sent, "Alice");
        assert_eq!(view.transcript().len(), 2);
        assert_eq!(view.transcript()[1], TranscriptMessage::user("Alice"));
    }

    #[test]
    fn reply_replaces_snapshot_wholesale() {
        let mut view = ViewState::new();
        view.submit("Alice").unwrap();
        view.apply_reply(reply(
            "Nice to meet you",
            CollectedInfo {
                name: Some("Alice".to_string()),
                ..CollectedInfo::new()
            },
            false,
        ));

        // A later reply without the name must clear it: snapshots are
        // replaced, never merged.
        view.apply_reply(reply("hm", CollectedInfo::new(), false));
        assert!(view.collected_info().name.is_none());
    }

    #[test]
    fn panel_masks_password_but_canonical_keeps_it() {
        let mut view = ViewState::new();
        view.apply_reply(reply(
            "Got it",
            CollectedInfo {
                password: Some("secret".to_string()),
                ..CollectedInfo::new()
            },
            false,
        ));

        assert!(view.info_panel().contains(MASKED_PASSWORD));
        assert!(!view.info_panel().contains("secret"));
        assert_eq!(view.collected_info().password.as_deref(), Some("secret"));
    }

    #[test]
    fn completion_disables_input_permanently() {
        let mut view = ViewState::new();
        view.submit("Initech").unwrap();
        let appended = view.apply_reply(reply(
            "All set!",
            CollectedInfo {
                name: Some("Alice".to_string()),
                username: Some("alice".to_string()),
                password: Some("s3cr3t!pw".to_string()),
                workplace: Some("Initech".to_string()),
            },
            true,
        ));

        assert_eq!(appended, 2);
        assert_eq!(
            view.transcript().last().unwrap().text,
            COMPLETION_MESSAGE
        );
        assert_eq!(view.state(), SessionState::Completed);

        // Further input attempts stay ignored.
        let before = view.transcript().len();
        assert!(view.submit("hello?").is_none());
        assert!(view.submit("anyone there?").is_none());
        assert_eq!(view.transcript().len(), before);
    }

    #[test]
    fn failure_appends_one_apology_and_keeps_input_enabled() {
        let mut view = ViewState::new();
        view.submit("Alice").unwrap();
        view.apply_failure();

        assert_eq!(view.transcript().len(), 3);
        assert_eq!(
            view.transcript().last().unwrap(),
            &TranscriptMessage::bot(APOLOGY_MESSAGE)
        );
        // The optimistic echo is never rolled back.
        assert_eq!(view.transcript()[1], TranscriptMessage::user("Alice"));
        assert!(view.input_enabled());
    }

    #[test]
    fn alice_scenario() {
        let mut view = ViewState::new();
        view.submit("Alice").unwrap();
        view.apply_reply(reply(
            "Nice to meet you",
            CollectedInfo {
                name: Some("Alice".to_string()),
                ..CollectedInfo::new()
            },
            false,
        ));

        let transcript = view.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0], TranscriptMessage::bot(GREETING_MESSAGE));
        assert_eq!(transcript[1], TranscriptMessage::user("Alice"));
        assert_eq!(transcript[2], TranscriptMessage::bot("Nice to meet you"));

        let panel = view.info_panel();
        assert!(panel.contains("\"name\": \"Alice\""));
        assert!(panel.contains("\"username\": null"));
        assert!(view.input_enabled());
    }
}
