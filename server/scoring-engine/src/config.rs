//! Engine configuration with sane defaults.
//!
//! Each tunable is also published as a named constant so callers and tests can
//! refer to the default without constructing a config.

use std::path::Path;

use serde::Deserialize;

use crate::error::ScoringError;
use crate::patterns::PatternLibrary;

/// Multiplier applied to the raw risk score before rounding onto 0..=10.
pub const DAMPING_FACTOR: f64 = 0.8;

/// Average words per sentence above which the complexity surcharge applies.
pub const SENTENCE_LENGTH_THRESHOLD: f64 = 35.0;

/// Number of evidence entries exposed for display.
pub const EVIDENCE_DISPLAY_LIMIT: usize = 10;

/// Minimum pattern hits a profile needs to win classification.
pub const MIN_CLASSIFICATION_MATCHES: usize = 2;

/// Trimmed text shorter than this (in chars) always classifies as unknown.
pub const MIN_TEXT_CHARS: usize = 10;

/// Environment variable naming an optional JSON settings file.
pub const CONFIG_ENV_VAR: &str = "SCORING_ENGINE_CONFIG";

/// Tunable thresholds for classification and risk scoring.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
  /// Raw score multiplier (0..=1).
  pub damping_factor: f64,
  /// Words per sentence that trigger the structural surcharge.
  pub sentence_length_threshold: f64,
  /// Evidence entries kept in the display list.
  pub evidence_display_limit: usize,
  /// Minimum evidence for a non-unknown classification.
  pub min_classification_matches: usize,
  /// Shortest text (trimmed chars) worth classifying.
  pub min_text_chars: usize,
}

impl Default for ScoringConfig {
  fn default() -> Self {
    Self {
      damping_factor: DAMPING_FACTOR,
      sentence_length_threshold: SENTENCE_LENGTH_THRESHOLD,
      evidence_display_limit: EVIDENCE_DISPLAY_LIMIT,
      min_classification_matches: MIN_CLASSIFICATION_MATCHES,
      min_text_chars: MIN_TEXT_CHARS,
    }
  }
}

impl ScoringConfig {
  pub fn validate(&self) -> Result<(), ScoringError> {
    if !self.damping_factor.is_finite() || self.damping_factor <= 0.0 || self.damping_factor > 1.0 {
      return Err(ScoringError::invalid_input(
        "scoring.damping_factor",
        "must be in (0, 1]",
      ));
    }
    if !self.sentence_length_threshold.is_finite() || self.sentence_length_threshold <= 0.0 {
      return Err(ScoringError::invalid_input(
        "scoring.sentence_length_threshold",
        "must be a positive number",
      ));
    }
    if self.evidence_display_limit == 0 {
      return Err(ScoringError::invalid_input(
        "scoring.evidence_display_limit",
        "must be at least 1",
      ));
    }
    if self.min_classification_matches == 0 {
      return Err(ScoringError::invalid_input(
        "scoring.min_classification_matches",
        "must be at least 1",
      ));
    }
    Ok(())
  }
}

/// Everything the binary needs to build an engine: thresholds plus the rule table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
  pub scoring: ScoringConfig,
  /// Replaces the built-in pattern library when present (validated on parse).
  pub library: Option<PatternLibrary>,
}

impl EngineSettings {
  /// Parse settings from a JSON document and validate them.
  pub fn from_json(raw: &str) -> Result<Self, ScoringError> {
    let settings: EngineSettings = serde_json::from_str(raw)?;
    settings.scoring.validate()?;
    Ok(settings)
  }

  pub fn from_file(path: &Path) -> Result<Self, ScoringError> {
    let raw = std::fs::read_to_string(path)?;
    Self::from_json(&raw)
  }

  /// Load from the file named by `SCORING_ENGINE_CONFIG`, or defaults when unset.
  pub fn from_env() -> Result<Self, ScoringError> {
    match std::env::var_os(CONFIG_ENV_VAR) {
      Some(path) if !path.is_empty() => Self::from_file(Path::new(&path)),
      _ => Ok(Self::default()),
    }
  }
}
