//! Sequential unlock rules for chapters and lessons.
//!
//! A chapter unlocks when the previous chapter is completed; the first one is
//! always unlocked. Inside a chapter the first lesson follows the chapter's
//! unlock state and every later lesson unlocks once its predecessor is
//! completed. Chapter unlock only ever looks at earlier chapters, so it can be
//! resolved before any of the chapter's own lessons.

use crate::domain::{ChapterStatus, LessonStatus};
use crate::progress::snapshot::ChapterSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChapterResolution {
  pub unlocked: bool,
  pub completed: bool,
  pub status: ChapterStatus,
  pub completed_lessons: usize,
  pub total_lessons: usize,
}

pub fn resolve_chapters(chapters: &[ChapterSnapshot]) -> Vec<ChapterResolution> {
  let mut out: Vec<ChapterResolution> = Vec::with_capacity(chapters.len());
  for chapter in chapters {
    let unlocked = out.last().map_or(true, |prev| prev.completed);
    out.push(resolve_chapter(chapter.completed_lessons(), chapter.total_lessons(), unlocked));
  }
  out
}

/// Status of one chapter from its lesson counts and whether its predecessor is done.
pub fn resolve_chapter(completed_lessons: usize, total_lessons: usize, unlocked: bool) -> ChapterResolution {
  // No lessons, nothing to complete.
  let completed = total_lessons > 0 && completed_lessons == total_lessons;
  let status = if completed {
    ChapterStatus::Completed
  } else if completed_lessons > 0 {
    ChapterStatus::InProgress
  } else if unlocked {
    ChapterStatus::Unlocked
  } else {
    ChapterStatus::Locked
  };
  ChapterResolution { unlocked, completed, status, completed_lessons, total_lessons }
}

/// `completed[i]` is lesson `i`'s completion flag, in lesson order.
pub fn resolve_lessons(completed: &[bool], chapter_unlocked: bool) -> Vec<LessonStatus> {
  completed
    .iter()
    .enumerate()
    .map(|(i, &done)| {
      let unlocked = if i == 0 { chapter_unlocked } else { completed[i - 1] };
      if done {
        LessonStatus::Completed
      } else if unlocked {
        LessonStatus::Unlocked
      } else {
        LessonStatus::Locked
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use std::collections::HashSet;

  use crate::domain::{Chapter, GameModule, Lesson, ModuleKind};
  use crate::progress::snapshot::LessonSnapshot;

  use ChapterStatus as C;
  use LessonStatus as L;

  /// One chapter per entry; each lesson is `(modules, completed_modules)`.
  fn chapters(shape: &[&[(usize, usize)]]) -> Vec<ChapterSnapshot> {
    shape
      .iter()
      .enumerate()
      .map(|(ci, lessons)| {
        let chapter_id = format!("c{ci}");
        ChapterSnapshot {
          chapter: Chapter { id: chapter_id.clone(), title: String::new(), description: String::new(), order: ci as i64, is_published: true },
          lessons: lessons
            .iter()
            .enumerate()
            .map(|(li, &(total, done))| {
              let lesson_id = format!("{chapter_id}-l{li}");
              let modules: Vec<GameModule> = (0..total)
                .map(|mi| GameModule { id: format!("{lesson_id}-m{mi}"), lesson_id: lesson_id.clone(), kind: ModuleKind::Mcq, position: None })
                .collect();
              let completed: HashSet<String> = modules.iter().take(done).map(|m| m.id.clone()).collect();
              let lesson = Lesson {
                id: lesson_id,
                title: String::new(),
                description: String::new(),
                chapter_id: chapter_id.clone(),
                order: Some(li as i64),
                is_published: true,
              };
              LessonSnapshot::new(lesson, modules, &completed)
            })
            .collect(),
        }
      })
      .collect()
  }

  fn statuses(res: &[ChapterResolution]) -> Vec<ChapterStatus> {
    res.iter().map(|r| r.status).collect()
  }

  #[test]
  fn first_chapter_is_unlocked_even_without_progress() {
    let res = resolve_chapters(&chapters(&[&[(1, 0)], &[(1, 0)]]));
    assert_eq!(statuses(&res), vec![C::Unlocked, C::Locked]);
    assert!(res[0].unlocked);
    assert!(!res[1].unlocked);
  }

  #[test]
  fn completion_unlocks_the_next_chapter_only() {
    let res = resolve_chapters(&chapters(&[&[(1, 1)], &[(2, 0)], &[(1, 0)]]));
    assert_eq!(statuses(&res), vec![C::Completed, C::Unlocked, C::Locked]);
  }

  #[test]
  fn partial_chapter_is_in_progress_and_blocks_the_next() {
    let res = resolve_chapters(&chapters(&[&[(2, 2), (2, 1)], &[(1, 0)]]));
    assert_eq!(statuses(&res), vec![C::InProgress, C::Locked]);
    assert_eq!((res[0].completed_lessons, res[0].total_lessons), (1, 2));
  }

  #[test]
  fn empty_chapter_never_completes_and_blocks_the_next() {
    let res = resolve_chapters(&chapters(&[&[], &[(1, 1)]]));
    assert_eq!(res[0].status, C::Unlocked);
    assert!(!res[0].completed);
    // Progress recorded behind a lock still shows up.
    assert_eq!(res[1].status, C::Completed);
    assert!(!res[1].unlocked);
  }

  #[test]
  fn locked_chapters_still_report_counts() {
    let res = resolve_chapters(&chapters(&[&[(1, 0)], &[(1, 0), (1, 0), (0, 0)]]));
    assert_eq!(res[1].status, C::Locked);
    assert_eq!((res[1].completed_lessons, res[1].total_lessons), (0, 3));
  }

  #[test]
  fn lessons_unlock_one_after_another() {
    assert_eq!(resolve_lessons(&[true, false, false], true), vec![L::Completed, L::Unlocked, L::Locked]);
    assert_eq!(resolve_lessons(&[false, false], true), vec![L::Unlocked, L::Locked]);
  }

  #[test]
  fn first_lesson_follows_chapter_lock() {
    assert_eq!(resolve_lessons(&[false, false], false), vec![L::Locked, L::Locked]);
    assert_eq!(resolve_lessons(&[true, false], false), vec![L::Completed, L::Unlocked]);
  }

  #[test]
  fn no_lessons_no_statuses() {
    assert!(resolve_lessons(&[], true).is_empty());
  }
}
