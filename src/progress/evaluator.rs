//! Module completion evaluation for a single lesson.

use std::collections::HashSet;

use crate::domain::GameModule;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModuleEvaluation {
  pub completed_modules: usize,
  pub total_modules: usize,
}

impl ModuleEvaluation {
  /// A lesson without modules is never completed.
  pub fn is_completed(&self) -> bool {
    self.total_modules > 0 && self.completed_modules == self.total_modules
  }
}

/// Count how many of `modules` appear in `completed` (ids with an `is_completed = true` record).
pub fn evaluate(modules: &[GameModule], completed: &HashSet<String>) -> ModuleEvaluation {
  ModuleEvaluation {
    completed_modules: modules.iter().filter(|m| completed.contains(&m.id)).count(),
    total_modules: modules.len(),
  }
}
