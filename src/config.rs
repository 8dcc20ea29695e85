//! Loading the content catalog (chapters → lessons → modules, plus optional
//! seed completion records) from TOML.
//!
//! See `CatalogConfig` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::{CompletionRecord, ModuleKind};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CatalogConfig {
  #[serde(default)]
  pub chapters: Vec<ChapterCfg>,
  /// Pre-recorded completion facts, mostly useful for demos.
  #[serde(default)]
  pub completions: Vec<CompletionRecord>,
}

/// Chapter entry. A missing `id` gets a generated one when the catalog is loaded.
#[derive(Clone, Debug, Deserialize)]
pub struct ChapterCfg {
  #[serde(default)] pub id: Option<String>,
  pub title: String,
  #[serde(default)] pub description: String,
  pub order: i64,
  #[serde(default = "yes")] pub is_published: bool,
  #[serde(default)] pub lessons: Vec<LessonCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LessonCfg {
  #[serde(default)] pub id: Option<String>,
  pub title: String,
  #[serde(default)] pub description: String,
  #[serde(default)] pub order: Option<i64>,
  #[serde(default = "yes")] pub is_published: bool,
  #[serde(default)] pub modules: Vec<ModuleCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ModuleCfg {
  #[serde(default)] pub id: Option<String>,
  #[serde(default)] pub kind: ModuleKind,
  #[serde(default)] pub position: Option<i64>,
}

fn yes() -> bool { true }

pub fn parse_catalog(s: &str) -> Result<CatalogConfig, toml::de::Error> {
  toml::from_str::<CatalogConfig>(s)
}

/// Attempt to load `CatalogConfig` from CATALOG_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_catalog_config_from_env() -> Option<CatalogConfig> {
  let path = std::env::var("CATALOG_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_catalog(&s) {
      Ok(cfg) => {
        info!(target: "lesson_progress", %path, chapters = cfg.chapters.len(), "Loaded catalog config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "lesson_progress", %path, error = %e, "Failed to parse TOML catalog");
        None
      }
    },
    Err(e) => {
      error!(target: "lesson_progress", %path, error = %e, "Failed to read TOML catalog file");
      None
    }
  }
}
