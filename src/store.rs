//! In-memory content and completion store.
//!
//! This module owns:
//!   - chapters by id
//!   - lessons by id, plus lesson ids per chapter
//!   - modules per lesson, in creation order
//!   - completion records keyed by (user, target)
//!
//! It implements both repository traits, so the engine reads from it the same
//! way it would read from a database-backed repository.

use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::CatalogConfig;
use crate::domain::{Chapter, CompletionRecord, GameModule, Lesson};
use crate::progress::snapshot::{sort_chapters, sort_lessons, sort_modules};
use crate::repository::{CompletionRepository, ContentRepository};

type RecordKey = (String, String);

#[derive(Clone, Default)]
pub struct InMemoryStore {
  chapters: Arc<RwLock<HashMap<String, Chapter>>>,
  lessons: Arc<RwLock<HashMap<String, Lesson>>>,
  lessons_by_chapter: Arc<RwLock<HashMap<String, Vec<String>>>>,
  modules_by_lesson: Arc<RwLock<HashMap<String, Vec<GameModule>>>>,
  completions: Arc<RwLock<HashMap<RecordKey, CompletionRecord>>>,
}

impl InMemoryStore {
  #[allow(dead_code)]
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a store from a catalog. Entries without ids get a fresh UUID.
  #[instrument(level = "info", skip_all, fields(chapters = cfg.chapters.len()))]
  pub fn from_catalog(cfg: &CatalogConfig) -> Self {
    let mut chapters = HashMap::<String, Chapter>::new();
    let mut lessons = HashMap::<String, Lesson>::new();
    let mut lessons_by_chapter = HashMap::<String, Vec<String>>::new();
    let mut modules_by_lesson = HashMap::<String, Vec<GameModule>>::new();
    let mut completions = HashMap::<RecordKey, CompletionRecord>::new();

    for cc in &cfg.chapters {
      let chapter_id = cc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
      for lc in &cc.lessons {
        let lesson_id = lc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
        let modules = modules_by_lesson.entry(lesson_id.clone()).or_default();
        for mc in &lc.modules {
          modules.push(GameModule {
            id: mc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string()),
            lesson_id: lesson_id.clone(),
            kind: mc.kind.clone(),
            position: mc.position,
          });
        }
        lessons_by_chapter.entry(chapter_id.clone()).or_default().push(lesson_id.clone());
        lessons.insert(lesson_id.clone(), Lesson {
          id: lesson_id,
          title: lc.title.clone(),
          description: lc.description.clone(),
          chapter_id: chapter_id.clone(),
          order: lc.order,
          is_published: lc.is_published,
        });
      }
      chapters.insert(chapter_id.clone(), Chapter {
        id: chapter_id,
        title: cc.title.clone(),
        description: cc.description.clone(),
        order: cc.order,
        is_published: cc.is_published,
      });
    }

    for r in &cfg.completions {
      completions.insert((r.user_id.clone(), r.target_id.clone()), r.clone());
    }

    let module_count: usize = modules_by_lesson.values().map(Vec::len).sum();
    info!(target: "lesson_progress", chapters = chapters.len(), lessons = lessons.len(), modules = module_count, completions = completions.len(), "Catalog inventory");

    Self {
      chapters: Arc::new(RwLock::new(chapters)),
      lessons: Arc::new(RwLock::new(lessons)),
      lessons_by_chapter: Arc::new(RwLock::new(lessons_by_chapter)),
      modules_by_lesson: Arc::new(RwLock::new(modules_by_lesson)),
      completions: Arc::new(RwLock::new(completions)),
    }
  }

  #[allow(dead_code)]
  #[instrument(level = "debug", skip(self, c), fields(id = %c.id))]
  pub async fn insert_chapter(&self, c: Chapter) {
    self.chapters.write().await.insert(c.id.clone(), c);
  }

  /// Insert or replace a lesson, keeping the per-chapter index in sync.
  #[allow(dead_code)]
  #[instrument(level = "debug", skip(self, l), fields(id = %l.id, chapter = %l.chapter_id))]
  pub async fn insert_lesson(&self, l: Lesson) {
    let mut lessons = self.lessons.write().await;
    let mut by_chapter = self.lessons_by_chapter.write().await;
    if let Some(prev) = lessons.get(&l.id) {
      if let Some(ids) = by_chapter.get_mut(&prev.chapter_id) {
        ids.retain(|id| id != &l.id);
      }
    }
    by_chapter.entry(l.chapter_id.clone()).or_default().push(l.id.clone());
    lessons.insert(l.id.clone(), l);
  }

  /// Append a module to its lesson; creation order is insertion order.
  #[allow(dead_code)]
  #[instrument(level = "debug", skip(self, m), fields(id = %m.id, lesson = %m.lesson_id))]
  pub async fn insert_module(&self, m: GameModule) {
    self.modules_by_lesson.write().await.entry(m.lesson_id.clone()).or_default().push(m);
  }

  /// Store a completion fact, replacing any earlier record for the same (user, target).
  #[allow(dead_code)]
  #[instrument(level = "debug", skip(self, r), fields(user = %r.user_id, target = %r.target_id, done = r.is_completed))]
  pub async fn upsert_completion(&self, r: CompletionRecord) {
    let key = (r.user_id.clone(), r.target_id.clone());
    let replaced = self.completions.write().await.insert(key, r).is_some();
    debug!(target: "lesson_progress", replaced, "Completion record stored");
  }
}

#[async_trait]
impl ContentRepository for InMemoryStore {
  async fn find_published_chapters_ordered(&self) -> Result<Vec<Chapter>> {
    let mut out: Vec<Chapter> = self.chapters.read().await.values().filter(|c| c.is_published).cloned().collect();
    sort_chapters(&mut out);
    Ok(out)
  }

  async fn find_published_lessons_ordered(&self, chapter_id: &str) -> Result<Vec<Lesson>> {
    let ids = { self.lessons_by_chapter.read().await.get(chapter_id).cloned().unwrap_or_default() };
    let lessons = self.lessons.read().await;
    let mut out: Vec<Lesson> = ids
      .iter()
      .filter_map(|id| lessons.get(id))
      .filter(|l| l.is_published)
      .cloned()
      .collect();
    sort_lessons(&mut out);
    Ok(out)
  }

  async fn find_modules(&self, lesson_id: &str) -> Result<Vec<GameModule>> {
    let mut out = self.modules_by_lesson.read().await.get(lesson_id).cloned().unwrap_or_default();
    sort_modules(&mut out);
    Ok(out)
  }
}

#[async_trait]
impl CompletionRepository for InMemoryStore {
  async fn find_completion_records(&self, user_id: &str, target_ids: &[String]) -> Result<Vec<CompletionRecord>> {
    let completions = self.completions.read().await;
    Ok(
      target_ids
        .iter()
        .filter_map(|t| completions.get(&(user_id.to_string(), t.clone())))
        .cloned()
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::parse_catalog;
  use crate::domain::ModuleKind;

  fn lesson(id: &str, chapter_id: &str, order: Option<i64>, published: bool) -> Lesson {
    Lesson {
      id: id.into(),
      title: id.into(),
      description: String::new(),
      chapter_id: chapter_id.into(),
      order,
      is_published: published,
    }
  }

  #[tokio::test]
  async fn only_published_content_is_listed_in_order() {
    let store = InMemoryStore::new();
    for (id, order, published) in [("c2", 2, true), ("c1", 1, true), ("draft", 0, false)] {
      store
        .insert_chapter(Chapter { id: id.into(), title: id.into(), description: String::new(), order, is_published: published })
        .await;
    }
    store.insert_lesson(lesson("b", "c1", Some(2), true)).await;
    store.insert_lesson(lesson("a", "c1", Some(1), true)).await;
    store.insert_lesson(lesson("hidden", "c1", Some(0), false)).await;

    let chapters = store.find_published_chapters_ordered().await.unwrap();
    let ids: Vec<_> = chapters.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2"]);

    let lessons = store.find_published_lessons_ordered("c1").await.unwrap();
    let ids: Vec<_> = lessons.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(store.find_published_lessons_ordered("missing").await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn moving_a_lesson_updates_the_chapter_index() {
    let store = InMemoryStore::new();
    store.insert_lesson(lesson("l", "c1", None, true)).await;
    store.insert_lesson(lesson("l", "c2", None, true)).await;
    assert!(store.find_published_lessons_ordered("c1").await.unwrap().is_empty());
    assert_eq!(store.find_published_lessons_ordered("c2").await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn upsert_replaces_previous_record() {
    let store = InMemoryStore::new();
    let rec = |done| CompletionRecord { user_id: "u".into(), target_id: "m".into(), is_completed: done };
    store.upsert_completion(rec(true)).await;
    store.upsert_completion(rec(false)).await;
    let found = store.find_completion_records("u", &["m".to_string(), "other".to_string()]).await.unwrap();
    assert_eq!(found, vec![rec(false)]);
    assert!(store.find_completion_records("v", &["m".to_string()]).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn catalog_generates_missing_ids_and_keeps_module_order() {
    let cfg = parse_catalog(
      r#"
[[chapters]]
title = "Anonymous"
order = 1
  [[chapters.lessons]]
  title = "Only"
    [[chapters.lessons.modules]]
    id = "x"
    [[chapters.lessons.modules]]
    id = "y"
    kind = "match"
"#,
    )
    .unwrap();
    let store = InMemoryStore::from_catalog(&cfg);
    let chapters = store.find_published_chapters_ordered().await.unwrap();
    assert_eq!(chapters.len(), 1);
    assert!(!chapters[0].id.is_empty());
    let lessons = store.find_published_lessons_ordered(&chapters[0].id).await.unwrap();
    assert_eq!(lessons.len(), 1);
    let modules = store.find_modules(&lessons[0].id).await.unwrap();
    let ids: Vec<_> = modules.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["x", "y"]);
    assert_eq!(modules[1].kind, ModuleKind::Match);
  }
}
