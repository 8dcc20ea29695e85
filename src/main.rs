//! Lesson progress backend
//!
//! - Axum HTTP API serving per-user chapter/lesson progress
//! - In-memory content store loaded from a TOML catalog (or built-in seeds)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   CATALOG_CONFIG_PATH : path to TOML catalog (chapters, lessons, modules, completions)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod progress;
mod protocol;
mod repository;
mod routes;
mod seeds;
mod state;
mod store;
mod telemetry;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "lesson_progress", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
      info!(target: "lesson_progress", "Shutdown signal received");
    })
    .await?;
  Ok(())
}
