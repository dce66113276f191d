//! Complexity report handed to the export collaborator.
//!
//! A report always carries the raw dimension ratings next to the derived total,
//! and parsing one recomputes the total so a stored report cannot drift from
//! its source data.

use serde::{Deserialize, Serialize};

use crate::complexity::{ComplexityLevel, ComplexityResult, DimensionScores};
use crate::error::ScoringError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityReport {
  pub weighted_total: f64,
  pub level: ComplexityLevel,
  pub scores: DimensionScores,
}

impl ComplexityReport {
  pub fn new(scores: DimensionScores) -> Self {
    let ComplexityResult {
      weighted_total,
      level,
    } = scores.aggregate();
    Self {
      weighted_total,
      level,
      scores,
    }
  }

  pub fn result(&self) -> ComplexityResult {
    ComplexityResult {
      weighted_total: self.weighted_total,
      level: self.level,
    }
  }

  pub fn to_json(&self) -> Result<String, ScoringError> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Parse a report and check its total and level against its own scores.
  pub fn from_json(raw: &str) -> Result<Self, ScoringError> {
    let report: ComplexityReport = serde_json::from_str(raw)?;
    let expected = report.scores.aggregate();
    if (expected.weighted_total - report.weighted_total).abs() > 1e-9 {
      return Err(ScoringError::invalid_input(
        "weighted_total",
        &format!(
          "report says {} but scores aggregate to {}",
          report.weighted_total, expected.weighted_total
        ),
      ));
    }
    if expected.level != report.level {
      return Err(ScoringError::invalid_input(
        "level",
        &format!("report says {} but scores band to {}", report.level, expected.level),
      ));
    }
    Ok(report)
  }
}
