//! Built-in demo catalog, used when no CATALOG_CONFIG_PATH is given.

use crate::config::{CatalogConfig, ChapterCfg, LessonCfg, ModuleCfg};
use crate::domain::ModuleKind;

fn module(id: &str, kind: ModuleKind) -> ModuleCfg {
  ModuleCfg { id: Some(id.into()), kind, position: None }
}

fn lesson(id: &str, title: &str, order: i64, modules: Vec<ModuleCfg>) -> LessonCfg {
  LessonCfg {
    id: Some(id.into()),
    title: title.into(),
    description: String::new(),
    order: Some(order),
    is_published: true,
    modules,
  }
}

/// Two small chapters so the app is browsable without external config.
pub fn seed_catalog() -> CatalogConfig {
  CatalogConfig {
    chapters: vec![
      ChapterCfg {
        id: Some("ch-basics".into()),
        title: "Basics".into(),
        description: "Greetings and simple sentences.".into(),
        order: 1,
        is_published: true,
        lessons: vec![
          lesson("ls-hello", "Saying hello", 1, vec![module("gm-hello-mcq", ModuleKind::Mcq), module("gm-hello-tf", ModuleKind::TrueFalse)]),
          lesson("ls-intro", "Introducing yourself", 2, vec![module("gm-intro-blank", ModuleKind::FillBlank), module("gm-intro-match", ModuleKind::Match)]),
        ],
      },
      ChapterCfg {
        id: Some("ch-daily".into()),
        title: "Daily life".into(),
        description: "Food, time and places.".into(),
        order: 2,
        is_published: true,
        lessons: vec![lesson("ls-food", "Ordering food", 1, vec![module("gm-food-mcq", ModuleKind::Mcq)])],
      },
    ],
    completions: vec![],
  }
}
