//! Engine facade: injected configuration and pattern library, pure entrypoints.

use std::sync::Arc;

use crate::classify;
use crate::complexity::{self, ComplexityResult};
use crate::config::{EngineSettings, ScoringConfig};
use crate::error::ScoringError;
use crate::patterns::PatternLibrary;
use crate::report::ComplexityReport;
use crate::request::Request;
use crate::risk;
use crate::types::*;

/// The scoring engine. Holds only immutable data, so one instance can be
/// shared across threads and called concurrently.
#[derive(Debug, Clone)]
pub struct Engine {
  config: ScoringConfig,
  library: Arc<PatternLibrary>,
}

impl Engine {
  pub fn new(config: ScoringConfig, library: Arc<PatternLibrary>) -> Self {
    Self { config, library }
  }

  pub fn with_defaults() -> Self {
    Self::new(ScoringConfig::default(), Arc::new(PatternLibrary::builtin()))
  }

  pub fn from_settings(settings: EngineSettings) -> Result<Self, ScoringError> {
    settings.scoring.validate()?;
    let library = settings.library.unwrap_or_default();
    Ok(Self::new(settings.scoring, Arc::new(library)))
  }

  pub fn config(&self) -> &ScoringConfig {
    &self.config
  }

  pub fn library(&self) -> &PatternLibrary {
    &self.library
  }

  pub fn classify(&self, text: &str) -> ClassificationResult {
    classify::classify(text, &self.library, &self.config)
  }

  pub fn score(&self, text: &str, type_id: &str) -> RiskAssessment {
    risk::score(text, type_id, &self.library, &self.config)
  }

  /// Classify, then score against the classified type.
  pub fn analyze(&self, text: &str) -> Analysis {
    let classification = self.classify(text);
    let assessment = self.score(text, &classification.type_id);
    Analysis {
      classification,
      assessment,
    }
  }

  pub fn aggregate<I, K>(&self, scores: I) -> Result<ComplexityResult, ScoringError>
  where
    I: IntoIterator<Item = (K, i64)>,
    K: AsRef<str>,
  {
    complexity::aggregate(scores)
  }

  /// Run a validated request. A supplied `type_id` replaces the classified
  /// type for scoring; classification is still reported.
  pub fn handle(&self, request: &Request) -> Output {
    let mut out = Output::default();

    if let Some(text) = &request.text {
      let classification = self.classify(text);
      let type_id = request
        .type_id
        .as_deref()
        .unwrap_or(&classification.type_id);
      out.assessment = Some(self.score(text, type_id));
      out.classification = Some(classification);
    }

    if let Some(scores) = &request.dimensions {
      out.complexity = Some(ComplexityReport::new(scores.clone()));
    }

    out
  }
}

impl Default for Engine {
  fn default() -> Self {
    Self::with_defaults()
  }
}
