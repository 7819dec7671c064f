//! Registration service binary.
//!
//! Serves the single `POST /chat` endpoint backed by an OpenAI-compatible
//! upstream assistant. The API key is read from the ENLIST_API_KEY
//! environment variable.
//!
//! # Usage
//!
//! ```bash
//! # Listen on the default address with the default model
//! enlist-server
//!
//! # Custom listen address and model
//! enlist-server --listen 0.0.0.0:8000 --model gpt-4o-mini
//!
//! # Point at a different OpenAI-compatible endpoint
//! enlist-server --upstream-url http://localhost:11434/v1/
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use arrrg::CommandLine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use enlist::server::{AppState, DEFAULT_LISTEN, ServerArgs, serve};
use enlist::{OpenAiAssistant, RegistrationHandler};

/// Main entry point for the enlist-server application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "enlist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (args, _) = ServerArgs::from_command_line_relaxed("enlist-server [OPTIONS]");

    let addr: SocketAddr = args.listen.as_deref().unwrap_or(DEFAULT_LISTEN).parse()?;

    let assistant = OpenAiAssistant::with_options(None, args.upstream_url, args.model, None)?;
    tracing::info!(model = assistant.model(), "upstream assistant configured");

    let state = AppState::new(RegistrationHandler::new(Arc::new(assistant)));
    serve(addr, state).await?;

    Ok(())
}
