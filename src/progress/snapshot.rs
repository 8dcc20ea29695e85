//! Content snapshot loading: one user's view of the published catalog with
//! per-lesson completion already evaluated.
//!
//! The loader owns ordering. Chapters are sorted by `(order, id)`, lessons by
//! `(order or 0, id)` and modules by explicit position, then creation order,
//! so the resolvers can treat every sequence as strict. Entities that do not
//! belong where a repository put them are logged and skipped.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use futures::future::try_join_all;
use tracing::{debug, instrument, warn};

use crate::domain::{Chapter, GameModule, Lesson};
use crate::progress::evaluator::{evaluate, ModuleEvaluation};
use crate::repository::{CompletionRepository, ContentRepository};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonSnapshot {
  pub lesson: Lesson,
  pub modules: Vec<GameModule>,
  pub evaluation: ModuleEvaluation,
}

impl LessonSnapshot {
  pub fn new(lesson: Lesson, modules: Vec<GameModule>, completed: &HashSet<String>) -> Self {
    let evaluation = evaluate(&modules, completed);
    Self { lesson, modules, evaluation }
  }

  pub fn is_completed(&self) -> bool {
    self.evaluation.is_completed()
  }

  pub fn first_module_id(&self) -> Option<&str> {
    self.modules.first().map(|m| m.id.as_str())
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterSnapshot {
  pub chapter: Chapter,
  pub lessons: Vec<LessonSnapshot>,
}

impl ChapterSnapshot {
  pub fn total_lessons(&self) -> usize {
    self.lessons.len()
  }

  pub fn completed_lessons(&self) -> usize {
    self.lessons.iter().filter(|l| l.is_completed()).count()
  }

  /// Completion flag per lesson, in lesson order.
  pub fn lesson_completion(&self) -> Vec<bool> {
    self.lessons.iter().map(LessonSnapshot::is_completed).collect()
  }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentSnapshot {
  pub chapters: Vec<ChapterSnapshot>,
}

pub fn sort_chapters(chapters: &mut [Chapter]) {
  chapters.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
}

pub fn sort_lessons(lessons: &mut [Lesson]) {
  lessons.sort_by(|a, b| a.sort_order().cmp(&b.sort_order()).then_with(|| a.id.cmp(&b.id)));
}

/// Stable: modules without a position keep the order they were given in.
pub fn sort_modules(modules: &mut [GameModule]) {
  modules.sort_by_key(|m| (m.position.is_none(), m.position));
}

#[instrument(level = "debug", skip(content, completions), fields(%user_id))]
pub async fn load_snapshot(
  content: &dyn ContentRepository,
  completions: &dyn CompletionRepository,
  user_id: &str,
) -> Result<ContentSnapshot> {
  let mut chapters: Vec<Chapter> = content
    .find_published_chapters_ordered()
    .await?
    .into_iter()
    .filter(|c| {
      if !c.is_published {
        warn!(target: "progress", chapter = %c.id, "Skipping unpublished chapter returned by repository");
      }
      c.is_published
    })
    .collect();
  sort_chapters(&mut chapters);

  // Lessons per chapter, then modules per lesson; independent reads, issued together.
  let lesson_lists = try_join_all(chapters.iter().map(|c| content.find_published_lessons_ordered(&c.id))).await?;
  let mut per_chapter: Vec<(Chapter, Vec<Lesson>)> = Vec::with_capacity(chapters.len());
  for (chapter, lessons) in chapters.into_iter().zip(lesson_lists) {
    let mut kept: Vec<Lesson> = lessons
      .into_iter()
      .filter(|l| {
        if l.chapter_id != chapter.id {
          warn!(target: "progress", lesson = %l.id, expected = %chapter.id, found = %l.chapter_id, "Skipping orphaned lesson");
          return false;
        }
        if !l.is_published {
          warn!(target: "progress", lesson = %l.id, "Skipping unpublished lesson returned by repository");
          return false;
        }
        true
      })
      .collect();
    sort_lessons(&mut kept);
    per_chapter.push((chapter, kept));
  }

  let module_lists = try_join_all(
    per_chapter.iter().flat_map(|(_, lessons)| lessons.iter().map(move |l| content.find_modules(&l.id))),
  )
  .await?;
  let mut module_lists = module_lists.into_iter();

  let mut grouped: Vec<(Chapter, Vec<(Lesson, Vec<GameModule>)>)> = Vec::with_capacity(per_chapter.len());
  let mut target_ids: Vec<String> = Vec::new();
  for (chapter, lessons) in per_chapter {
    let mut with_modules = Vec::with_capacity(lessons.len());
    for lesson in lessons {
      let Some(modules) = module_lists.next() else { continue };
      let modules = keep_lesson_modules(&lesson, modules);
      target_ids.extend(modules.iter().map(|m| m.id.clone()));
      with_modules.push((lesson, modules));
    }
    grouped.push((chapter, with_modules));
  }

  let completed = if target_ids.is_empty() {
    HashSet::new()
  } else {
    completed_targets(completions, user_id, &target_ids).await?
  };
  debug!(target: "progress", %user_id, modules = target_ids.len(), completed = completed.len(), "Completion records resolved");

  let chapters = grouped
    .into_iter()
    .map(|(chapter, lessons)| ChapterSnapshot {
      chapter,
      lessons: lessons
        .into_iter()
        .map(|(lesson, modules)| LessonSnapshot::new(lesson, modules, &completed))
        .collect(),
    })
    .collect();
  Ok(ContentSnapshot { chapters })
}

fn keep_lesson_modules(lesson: &Lesson, modules: Vec<GameModule>) -> Vec<GameModule> {
  let mut seen = HashSet::new();
  let mut kept: Vec<GameModule> = modules
    .into_iter()
    .filter(|m| {
      if m.lesson_id != lesson.id {
        warn!(target: "progress", module = %m.id, expected = %lesson.id, found = %m.lesson_id, "Skipping orphaned module");
        return false;
      }
      if !seen.insert(m.id.clone()) {
        warn!(target: "progress", module = %m.id, lesson = %lesson.id, "Skipping duplicate module");
        return false;
      }
      true
    })
    .collect();
  sort_modules(&mut kept);
  kept
}

/// Ids whose latest record is `is_completed = true`. Later records override earlier ones.
async fn completed_targets(
  completions: &dyn CompletionRepository,
  user_id: &str,
  target_ids: &[String],
) -> Result<HashSet<String>> {
  let wanted: HashSet<&str> = target_ids.iter().map(String::as_str).collect();
  let mut latest: HashMap<String, bool> = HashMap::new();
  for record in completions.find_completion_records(user_id, target_ids).await? {
    if record.user_id != user_id || !wanted.contains(record.target_id.as_str()) {
      continue;
    }
    latest.insert(record.target_id, record.is_completed);
  }
  Ok(latest.into_iter().filter(|(_, done)| *done).map(|(id, _)| id).collect())
}
