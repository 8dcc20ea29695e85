//! Errors surfaced by the progress engine.

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
  #[error("invalid user: user id must be a non-empty string")]
  InvalidUser,
  #[error("storage error: {0}")]
  Storage(anyhow::Error),
}
