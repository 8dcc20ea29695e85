//! Application state: the repositories the progress engine reads from.
//!
//! Both seams are backed by one `InMemoryStore`, filled from the TOML catalog
//! (CATALOG_CONFIG_PATH) or, failing that, from the built-in seed catalog.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::config::load_catalog_config_from_env;
use crate::repository::{CompletionRepository, ContentRepository};
use crate::seeds::seed_catalog;
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
  pub content: Arc<dyn ContentRepository>,
  pub completions: Arc<dyn CompletionRepository>,
}

impl AppState {
  /// Build state from env: load catalog (or seeds) into the in-memory store.
  #[instrument(level = "info", skip_all)]
  pub fn new() -> Self {
    let catalog = match load_catalog_config_from_env() {
      Some(cfg) => cfg,
      None => {
        warn!(target: "lesson_progress", "No usable catalog config; serving built-in seed catalog");
        seed_catalog()
      }
    };
    let state = Self::with_store(InMemoryStore::from_catalog(&catalog));
    info!(target: "lesson_progress", "Application state ready");
    state
  }

  pub fn with_store(store: InMemoryStore) -> Self {
    let store = Arc::new(store);
    Self { content: store.clone(), completions: store }
  }
}
