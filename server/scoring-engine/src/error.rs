//! Structured error types for the scoring engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
  #[error("invalid input: {field}: {reason}")]
  InvalidInput { field: String, reason: String },

  #[error("out of range: {dimension} = {value} (expected 1..=10)")]
  OutOfRange { dimension: String, value: i64 },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

impl ScoringError {
  pub fn invalid_input(field: &str, reason: &str) -> Self {
    Self::InvalidInput {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn out_of_range(dimension: &str, value: i64) -> Self {
    Self::OutOfRange {
      dimension: dimension.to_string(),
      value,
    }
  }

  /// Field name for validation failures, if the error carries one.
  pub fn field(&self) -> Option<&str> {
    match self {
      Self::InvalidInput { field, .. } => Some(field),
      Self::OutOfRange { dimension, .. } => Some(dimension),
      _ => None,
    }
  }
}
