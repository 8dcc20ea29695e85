//! Assembly of chapter/lesson summaries from resolved statuses.

use crate::domain::{ChapterSummary, LessonStatus, LessonSummary};
use crate::progress::resolver::ChapterResolution;
use crate::progress::snapshot::ContentSnapshot;

/// Zip snapshot, chapter resolutions and per-chapter lesson statuses, all in
/// snapshot order. The three inputs are expected to line up one to one.
pub fn aggregate(
  snapshot: &ContentSnapshot,
  chapters: &[ChapterResolution],
  lessons: &[Vec<LessonStatus>],
) -> Vec<ChapterSummary> {
  snapshot
    .chapters
    .iter()
    .zip(chapters)
    .zip(lessons)
    .map(|((ch, res), statuses)| ChapterSummary {
      id: ch.chapter.id.clone(),
      title: ch.chapter.title.clone(),
      description: ch.chapter.description.clone(),
      order: ch.chapter.order,
      status: res.status,
      completed_lessons: res.completed_lessons,
      total_lessons: res.total_lessons,
      lessons: ch
        .lessons
        .iter()
        .zip(statuses)
        .map(|(l, &status)| LessonSummary {
          id: l.lesson.id.clone(),
          title: l.lesson.title.clone(),
          description: l.lesson.description.clone(),
          order: l.lesson.sort_order(),
          status,
          game_module_id: l.first_module_id().map(str::to_string),
        })
        .collect(),
    })
    .collect()
}
