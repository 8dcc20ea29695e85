//! Public protocol structs for HTTP endpoints (serde ready).
//! Progress responses reuse `ChapterSummary` directly; see `domain.rs`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
  #[serde(rename = "userId", default)]
  pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
  pub error: String,
}
