//! Interview Bot · Backend
//!
//! - Axum HTTP + WebSocket API
//! - Generates coding-interview questions and grades answers via a hosted LLM
//!
//! Important env variables:
//!   PORT              : u16 (default 8000)
//!   LLM_PROVIDER      : "cohere" (default) or "openai"
//!   COHERE_API_KEY    : required when LLM_PROVIDER=cohere
//!   COHERE_BASE_URL   : default "https://api.cohere.ai/v1"
//!   COHERE_MODEL      : default "command"
//!   OPENAI_API_KEY    : required when LLM_PROVIDER=openai
//!   OPENAI_BASE_URL   : default "https://api.openai.com/v1"
//!   OPENAI_MODEL      : default "gpt-4o-mini"
//!   LLM_TIMEOUT_SECS  : per-call HTTP timeout (default 20)
//!   BOT_CONFIG_PATH   : path to TOML config (prompts + generation parameters)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod error;
mod score;
mod llm;
mod cohere;
mod openai;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Fails when the selected provider has no credential.
  let state = Arc::new(AppState::from_env()?);

  let app = build_router(state);

  let port = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .unwrap_or(DEFAULT_PORT);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "interview_bot", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "interview_bot", error = %e, "Failed to listen for ctrl-c; running until killed");
    std::future::pending::<()>().await;
  }
  info!(target: "interview_bot", "Shutdown signal received");
}
