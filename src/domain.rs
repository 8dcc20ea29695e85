//! Domain models: published content (chapters, lessons, game modules), per-user
//! completion records, and the derived progress summaries served to clients.

use serde::{Deserialize, Serialize};

/// Top-level content grouping. `order` defines the global sequence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chapter {
  pub id: String,
  pub title: String,
  #[serde(default)] pub description: String,
  pub order: i64,
  #[serde(default = "published_by_default")] pub is_published: bool,
}

/// A learning unit inside a chapter. A missing `order` sorts as `0`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lesson {
  pub id: String,
  pub title: String,
  #[serde(default)] pub description: String,
  pub chapter_id: String,
  #[serde(default)] pub order: Option<i64>,
  #[serde(default = "published_by_default")] pub is_published: bool,
}

impl Lesson {
  pub fn sort_order(&self) -> i64 {
    self.order.unwrap_or(0)
  }
}

/// What kind of interaction a module presents. Progress never looks inside it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
  #[default]
  Mcq,
  FillBlank,
  Match,
  TrueFalse,
  Other,
}

/// One answerable question inside a lesson.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameModule {
  pub id: String,
  pub lesson_id: String,
  #[serde(default)] pub kind: ModuleKind,
  /// Explicit position; modules without one keep their creation order.
  #[serde(default)] pub position: Option<i64>,
}

/// "User `user_id` completed `target_id`". Latest write wins per pair.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionRecord {
  pub user_id: String,
  pub target_id: String,
  pub is_completed: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonStatus {
  Locked,
  Unlocked,
  Completed,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChapterStatus {
  Locked,
  Unlocked,
  InProgress,
  Completed,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
  pub id: String,
  pub title: String,
  pub description: String,
  pub order: i64,
  pub status: LessonStatus,
  pub game_module_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
  pub id: String,
  pub title: String,
  pub description: String,
  pub order: i64,
  pub status: ChapterStatus,
  pub completed_lessons: usize,
  pub total_lessons: usize,
  pub lessons: Vec<LessonSummary>,
}

fn published_by_default() -> bool { true }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn summaries_serialize_with_camel_case_fields() {
    let summary = ChapterSummary {
      id: "ch1".into(),
      title: "Basics".into(),
      description: String::new(),
      order: 1,
      status: ChapterStatus::InProgress,
      completed_lessons: 1,
      total_lessons: 2,
      lessons: vec![LessonSummary {
        id: "l1".into(),
        title: "Hello".into(),
        description: String::new(),
        order: 0,
        status: LessonStatus::Unlocked,
        game_module_id: None,
      }],
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["status"], "IN_PROGRESS");
    assert_eq!(json["completedLessons"], 1);
    assert_eq!(json["totalLessons"], 2);
    assert!(json["lessons"][0]["gameModuleId"].is_null());
    assert_eq!(json["lessons"][0]["status"], "UNLOCKED");
  }

  #[test]
  fn content_defaults_to_published() {
    let chapter: Chapter = toml::from_str("id = \"c\"\ntitle = \"T\"\norder = 3").unwrap();
    assert!(chapter.is_published);
    assert!(chapter.description.is_empty());
  }
}
