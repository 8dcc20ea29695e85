//! Per-user progress computation.
//!
//! Flow:
//! 1) Load a snapshot of published content with lesson completion evaluated.
//! 2) Resolve chapter unlock/status from earlier chapters.
//! 3) Resolve lesson statuses inside each chapter.
//! 4) Assemble the ordered chapter summaries.
//!
//! Lesson completion is module based: a lesson is done when it has at least
//! one module and every module has an `is_completed = true` record.

pub mod aggregate;
pub mod evaluator;
pub mod resolver;
pub mod snapshot;

use tracing::{info, instrument};

use crate::domain::{ChapterSummary, LessonStatus};
use crate::error::ProgressError;
use crate::repository::{CompletionRepository, ContentRepository};

use self::aggregate::aggregate;
use self::resolver::{resolve_chapters, resolve_lessons};
use self::snapshot::{load_snapshot, ContentSnapshot};

/// Chapter summaries for `user_id`, in chapter order.
#[instrument(level = "info", skip(content, completions), fields(%user_id))]
pub async fn user_progress(
  content: &dyn ContentRepository,
  completions: &dyn CompletionRepository,
  user_id: &str,
) -> Result<Vec<ChapterSummary>, ProgressError> {
  let user_id = user_id.trim();
  if user_id.is_empty() {
    return Err(ProgressError::InvalidUser);
  }
  let snapshot = load_snapshot(content, completions, user_id).await.map_err(ProgressError::Storage)?;
  let summaries = compute(&snapshot);
  info!(target: "progress", %user_id, chapters = summaries.len(), "Progress computed");
  Ok(summaries)
}

/// Pure part of the engine: statuses and summaries from a loaded snapshot.
pub fn compute(snapshot: &ContentSnapshot) -> Vec<ChapterSummary> {
  let chapters = resolve_chapters(&snapshot.chapters);
  let lessons: Vec<Vec<LessonStatus>> = snapshot
    .chapters
    .iter()
    .zip(&chapters)
    .map(|(ch, res)| resolve_lessons(&ch.lesson_completion(), res.unlocked))
    .collect();
  aggregate(snapshot, &chapters, &lessons)
}
