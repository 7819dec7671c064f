//! HTTP surface of the registration service.
//!
//! One API route: `POST /chat`. The whole process shares a single
//! conversation session, so the handler sits behind a mutex and turns are
//! served in arrival order.

use std::net::SocketAddr;
use std::sync::Arc;

use arrrg_derive::CommandLine;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::handler::RegistrationHandler;
use crate::types::ChatRequest;

/// Default listen address of the registration service.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8000";

/// Command-line arguments for the enlist-server tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ServerArgs {
    /// Address to listen on.
    #[arrrg(optional, "Address to listen on (default: 127.0.0.1:8000)", "ADDR")]
    pub listen: Option<String>,

    /// Upstream model name.
    #[arrrg(optional, "Upstream model to use (default: gpt-3.5-turbo)", "MODEL")]
    pub model: Option<String>,

    /// Upstream base URL.
    #[arrrg(optional, "OpenAI-compatible upstream base URL", "URL")]
    pub upstream_url: Option<String>,
}

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    handler: Arc<Mutex<RegistrationHandler>>,
}

impl AppState {
    /// Creates application state around a registration handler.
    pub fn new(handler: RegistrationHandler) -> Self {
        Self {
            handler: Arc::new(Mutex::new(handler)),
        }
    }
}

/// Error body returned for failed exchanges.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable description of the failure.
    pub error: String,
}

/// Create the API router.
pub fn router(state: AppState) -> Router {
    Router::new().route("/chat", post(chat)).with_state(state)
}

/// Bind the listener and serve the API until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| Error::io(format!("failed to bind {addr}"), err))?;
    tracing::info!("registration service listening on {addr}");
    axum::serve(listener, router(state))
        .await
        .map_err(|err| Error::io("server terminated", err))
}

/// `POST /chat`: run one conversation turn through the shared handler.
async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let mut handler = state.handler.lock().await;
    match handler.handle_message(&request.message).await {
        Ok(reply) => {
            tracing::debug!(
                field = handler.current_field().key(),
                complete = reply.registration_complete,
                "turn handled"
            );
            (StatusCode::OK, Json(reply)).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "turn failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
