//! Result types shared by the classifier, risk scorer and JSON boundary.

use serde::{Deserialize, Serialize};

use crate::report::ComplexityReport;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
  pub type_id: String,
  /// Distinct patterns matched by the winning profile.
  pub match_count: usize,
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Low,
  Medium,
  High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  Low,
  Moderate,
  High,
  Critical,
}

impl RiskLevel {
  /// Band a normalized 0..=10 score: low 0-3, moderate 4-6, high 7-8, critical 9-10.
  pub fn from_score(score: u8) -> Self {
    match score {
      0..=3 => Self::Low,
      4..=6 => Self::Moderate,
      7..=8 => Self::High,
      _ => Self::Critical,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Moderate => "moderate",
      Self::High => "high",
      Self::Critical => "critical",
    }
  }
}

impl std::fmt::Display for RiskLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One matched rule, phrase or heuristic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskEvidence {
  pub pattern: String,
  pub description: String,
  pub severity: Severity,
  pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
  /// Sum of every matched weight, uncapped.
  pub raw_score: f64,
  pub normalized_score: u8,
  pub level: RiskLevel,
  /// Display list: the first entries of the full evidence in match order.
  pub evidence: Vec<RiskEvidence>,
  /// Size of the full evidence list.
  pub evidence_count: usize,
  pub summary: String,
  #[serde(skip)]
  all_evidence: Vec<RiskEvidence>,
}

impl RiskAssessment {
  pub(crate) fn new(
    raw_score: f64,
    normalized_score: u8,
    all_evidence: Vec<RiskEvidence>,
    display_limit: usize,
    summary: String,
  ) -> Self {
    let evidence: Vec<RiskEvidence> = all_evidence.iter().take(display_limit).cloned().collect();
    Self {
      raw_score,
      normalized_score,
      level: RiskLevel::from_score(normalized_score),
      evidence,
      evidence_count: all_evidence.len(),
      summary,
      all_evidence,
    }
  }

  /// Every evidence entry, untruncated. Score and level derive from this list.
  pub fn full_evidence(&self) -> &[RiskEvidence] {
    &self.all_evidence
  }

  /// The display-truncated evidence list.
  pub fn display_evidence(&self) -> &[RiskEvidence] {
    &self.evidence
  }
}

/// Classification plus the assessment scored against the classified type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
  pub classification: ClassificationResult,
  pub assessment: RiskAssessment,
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Output: one JSON object to stdout.
#[derive(Debug, Default, Serialize)]
pub struct Output {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub classification: Option<ClassificationResult>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assessment: Option<RiskAssessment>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub complexity: Option<ComplexityReport>,
}

/// Structured error output for rejected requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
