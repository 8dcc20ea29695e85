//! Read-side repository seams consumed by the progress engine.
//!
//! Implementations may talk to any backing store; the engine only relies on
//! these contracts. `InMemoryStore` (see `store.rs`) is the bundled one.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{Chapter, CompletionRecord, GameModule, Lesson};

/// Published content, read-only.
#[async_trait]
pub trait ContentRepository: Send + Sync {
  /// Published chapters, ascending by `order`.
  async fn find_published_chapters_ordered(&self) -> Result<Vec<Chapter>>;

  /// Published lessons of one chapter, ascending by `order`.
  async fn find_published_lessons_ordered(&self, chapter_id: &str) -> Result<Vec<Lesson>>;

  /// Modules of one lesson, in stable (position, then creation) order.
  async fn find_modules(&self, lesson_id: &str) -> Result<Vec<GameModule>>;
}

/// Per-user completion facts.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
  /// Records of `user_id` whose target is one of `target_ids`.
  async fn find_completion_records(&self, user_id: &str, target_ids: &[String]) -> Result<Vec<CompletionRecord>>;
}
