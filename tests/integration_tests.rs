//! Integration tests for the enlist crate.
//!
//! These tests run the chat session against a real in-process registration
//! service with a scripted upstream assistant, so the whole
//! client-to-handler loop is exercised over HTTP on an ephemeral port.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use enlist::assistant::Assistant;
use enlist::chat::{
    APOLOGY_MESSAGE, ChatSession, COMPLETION_MESSAGE, GREETING_MESSAGE, Renderer,
};
use enlist::server::{AppState, router};
use enlist::types::{MASKED_PASSWORD, Sender};
use enlist::{ChatClient, RegistrationHandler, Result};

/// Assistant returning a fixed sequence of replies.
struct ScriptedAssistant {
    replies: Mutex<Vec<String>>,
}

impl ScriptedAssistant {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().rev().map(|s| s.to_string()).collect()),
        })
    }
}

#[async_trait::async_trait]
impl Assistant for ScriptedAssistant {
    async fn reply(&self, _system_prompt: &str, _user_message: &str) -> Result<String> {
        self.replies
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| enlist::Error::internal_server("no scripted reply left"))
    }
}

/// Renderer that records everything the session draws.
#[derive(Default)]
struct RecordingRenderer {
    messages: Vec<(Sender, String)>,
    panels: Vec<String>,
}

impl Renderer for RecordingRenderer {
    fn print_message(&mut self, sender: Sender, text: &str) {
        self.messages.push((sender, text.to_string()));
    }

    fn print_info_panel(&mut self, panel: &str) {
        self.panels.push(panel.to_string());
    }

    fn print_info(&mut self, _info: &str) {}

    fn print_error(&mut self, _error: &str) {}
}

async fn spawn_service(assistant: Arc<dyn Assistant>) -> SocketAddr {
    let state = AppState::new(RegistrationHandler::new(assistant));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    addr
}

fn session_for(addr: SocketAddr) -> ChatSession {
    let client = ChatClient::new(Some(format!("http://{addr}/"))).unwrap();
    ChatSession::new(client)
}

#[tokio::test]
async fn alice_scenario_end_to_end() {
    let addr = spawn_service(ScriptedAssistant::new(&["VALID: Nice to meet you"])).await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    session.begin(&mut renderer);
    session.send("Alice", &mut renderer).await;

    let transcript = session.view().transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].text, GREETING_MESSAGE);
    assert_eq!(transcript[1].text, "Alice");
    assert_eq!(transcript[1].sender, Sender::User);
    assert_eq!(transcript[2].text, "Nice to meet you");
    assert_eq!(transcript[2].sender, Sender::Bot);

    let panel = session.view().info_panel();
    assert!(panel.contains("\"name\": \"Alice\""));
    assert!(panel.contains("\"username\": null"));
    assert!(panel.contains("\"password\": null"));
    assert!(panel.contains("\"workplace\": null"));
    assert!(!session.is_completed());

    // The echo was rendered before the reply arrived.
    assert_eq!(renderer.messages[1], (Sender::User, "Alice".to_string()));
}

#[tokio::test]
async fn full_registration_reaches_terminal_state() {
    let addr = spawn_service(ScriptedAssistant::new(&[
        "VALID: Nice to meet you, Alice!",
        "VALID: Great username.",
        "VALID: Strong password.",
        "VALID: You're all set.",
    ]))
    .await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    session.begin(&mut renderer);
    session.send("my name is alice", &mut renderer).await;
    session.send("alice99", &mut renderer).await;
    session.send("s3cr3t!pw", &mut renderer).await;
    session.send("I work at Initech", &mut renderer).await;

    assert!(session.is_completed());
    let transcript = session.view().transcript();
    assert_eq!(transcript.last().unwrap().text, COMPLETION_MESSAGE);

    let info = session.view().collected_info();
    assert_eq!(info.name.as_deref(), Some("Alice"));
    assert_eq!(info.username.as_deref(), Some("alice99"));
    assert_eq!(info.password.as_deref(), Some("s3cr3t!pw"));
    assert_eq!(info.workplace.as_deref(), Some("Initech"));

    // Input is disabled terminally: further sends change nothing.
    let before = transcript.len();
    session.send("hello?", &mut renderer).await;
    assert_eq!(session.view().transcript().len(), before);
    assert!(session.is_completed());
}

#[tokio::test]
async fn password_is_masked_in_panel_only() {
    let addr = spawn_service(ScriptedAssistant::new(&[
        "VALID: Hi Alice",
        "VALID: Good username",
        "VALID: Password accepted",
    ]))
    .await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    session.send("alice", &mut renderer).await;
    session.send("alice99", &mut renderer).await;
    session.send("secretpw!", &mut renderer).await;

    let panel = session.view().info_panel();
    assert!(panel.contains(MASKED_PASSWORD));
    assert!(!panel.contains("secretpw!"));
    assert_eq!(
        session.view().collected_info().password.as_deref(),
        Some("secretpw!")
    );
}

#[tokio::test]
async fn whitespace_input_never_reaches_the_wire() {
    // No scripted replies: any request would make the service answer 502 and
    // the transcript would grow an apology.
    let addr = spawn_service(ScriptedAssistant::new(&[])).await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    session.send("", &mut renderer).await;
    session.send("   \t ", &mut renderer).await;

    assert_eq!(session.view().transcript().len(), 1);
    assert!(renderer.messages.is_empty());
}

#[tokio::test]
async fn connection_failure_collapses_to_apology() {
    // Bind then drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    session.send("Alice", &mut renderer).await;

    let transcript = session.view().transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].text, "Alice");
    assert_eq!(transcript.last().unwrap().text, APOLOGY_MESSAGE);
    assert!(!session.is_completed());

    // Retry by resending is allowed and yields exactly one more apology.
    session.send("Alice", &mut renderer).await;
    assert_eq!(session.view().transcript().len(), 5);
}

#[tokio::test]
async fn handler_failure_collapses_to_apology() {
    let addr = spawn_service(ScriptedAssistant::new(&[])).await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    session.send("Alice", &mut renderer).await;

    let transcript = session.view().transcript();
    assert_eq!(transcript.last().unwrap().text, APOLOGY_MESSAGE);
    assert!(!session.is_completed());
}

#[tokio::test]
async fn non_valid_replies_leave_snapshot_empty() {
    let addr = spawn_service(ScriptedAssistant::new(&[
        "I can't help with that, but what's your name?",
    ]))
    .await;
    let mut session = session_for(addr);
    let mut renderer = RecordingRenderer::default();

    session.send("what is this?", &mut renderer).await;

    assert!(session.view().collected_info().name.is_none());
    assert_eq!(
        session.view().transcript().last().unwrap().text,
        "I can't help with that, but what's your name?"
    );
}
