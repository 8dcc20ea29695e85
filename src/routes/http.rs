//! HTTP endpoint handlers. These are thin wrappers that forward to the progress engine.
//! Each handler is instrumented and logs basic result info.

use std::sync::Arc;

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use tracing::{error, info, instrument, warn};

use crate::error::ProgressError;
use crate::progress::user_progress;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state), fields(user_id = %q.user_id))]
pub async fn http_get_progress(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProgressQuery>,
) -> Result<impl IntoResponse, ProgressError> {
  let chapters = user_progress(state.content.as_ref(), state.completions.as_ref(), &q.user_id).await?;
  info!(target: "lesson_progress", user_id = %q.user_id, chapters = chapters.len(), "HTTP progress served");
  Ok(Json(chapters))
}

impl IntoResponse for ProgressError {
  fn into_response(self) -> Response {
    let status = match &self {
      ProgressError::InvalidUser => {
        warn!(target: "lesson_progress", "Rejected progress request without user id");
        StatusCode::BAD_REQUEST
      }
      ProgressError::Storage(e) => {
        error!(target: "lesson_progress", error = %e, "Progress computation failed");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}
