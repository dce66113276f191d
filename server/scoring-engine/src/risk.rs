//! Risk scoring: universal rules, type-specific phrases and a sentence-length
//! surcharge, damped onto a 0..=10 scale.

use crate::config::ScoringConfig;
use crate::patterns::{DocumentTypeProfile, PatternLibrary};
use crate::types::{RiskAssessment, RiskEvidence, RiskLevel, Severity};

/// Weight of each matched type-specific phrase.
pub const TYPE_FACTOR_WEIGHT: f64 = 1.0;

/// Universal rules at or above this weight are reported as high severity.
pub const HIGH_SEVERITY_WEIGHT: f64 = 2.0;

/// Weight of the structural-complexity surcharge.
pub const COMPLEXITY_WEIGHT: f64 = 1.0;

pub const COMPLEXITY_PATTERN: &str = "long sentences";
pub const COMPLEXITY_DESCRIPTION: &str =
  "Sentences are unusually long, which makes the obligations harder to follow";

/// Score `text` as a document of type `type_id`.
///
/// Evidence order is fixed: universal rules in table order, then the
/// profile's phrases, then the complexity surcharge.
pub fn score(
  text: &str,
  type_id: &str,
  library: &PatternLibrary,
  config: &ScoringConfig,
) -> RiskAssessment {
  let lower = text.to_lowercase();
  let profile = library.profile(type_id);

  let mut evidence = universal_evidence(&lower, library);
  evidence.extend(profile_evidence(&lower, profile, &evidence));
  if average_sentence_length(text) > config.sentence_length_threshold {
    evidence.push(RiskEvidence {
      pattern: COMPLEXITY_PATTERN.to_string(),
      description: COMPLEXITY_DESCRIPTION.to_string(),
      severity: Severity::Low,
      weight: COMPLEXITY_WEIGHT,
    });
  }

  let raw_score: f64 = evidence.iter().map(|e| e.weight).sum();
  let normalized_score = normalize_score(raw_score, config.damping_factor);
  let level = RiskLevel::from_score(normalized_score);
  let summary = summarize(level, &profile.name, evidence.len());

  RiskAssessment::new(
    raw_score,
    normalized_score,
    evidence,
    config.evidence_display_limit,
    summary,
  )
}

/// `clamp(round(raw * damping), 0, 10)`.
pub fn normalize_score(raw_score: f64, damping_factor: f64) -> u8 {
  let damped = (raw_score * damping_factor).round();
  if damped.is_nan() {
    return 0;
  }
  damped.clamp(0.0, 10.0) as u8
}

/// Words per sentence, splitting on `.`, `!` and `?` and ignoring empty fragments.
/// Text without any sentence counts as a single sentence.
pub fn average_sentence_length(text: &str) -> f64 {
  let words = text.split_whitespace().count();
  let sentences = text
    .split(['.', '!', '?'])
    .filter(|s| !s.trim().is_empty())
    .count();
  words as f64 / sentences.max(1) as f64
}

fn universal_evidence(lower: &str, library: &PatternLibrary) -> Vec<RiskEvidence> {
  library
    .rules()
    .iter()
    .filter(|rule| lower.contains(rule.pattern.as_str()))
    .map(|rule| RiskEvidence {
      pattern: rule.pattern.clone(),
      description: rule.description.clone(),
      severity: if rule.weight >= HIGH_SEVERITY_WEIGHT {
        Severity::High
      } else {
        Severity::Medium
      },
      weight: rule.weight,
    })
    .collect()
}

// A phrase already inside a matched universal pattern ("sell" in "sell your")
// would count the same words twice, so it is skipped.
fn profile_evidence(
  lower: &str,
  profile: &DocumentTypeProfile,
  prior: &[RiskEvidence],
) -> Vec<RiskEvidence> {
  let mut out: Vec<RiskEvidence> = Vec::new();
  for factor in &profile.risk_factors {
    if !lower.contains(factor.as_str()) {
      continue;
    }
    let covered = prior
      .iter()
      .chain(out.iter())
      .any(|e| e.pattern.contains(factor.as_str()));
    if covered {
      continue;
    }
    out.push(RiskEvidence {
      pattern: factor.clone(),
      description: format!("Phrase commonly tied to one-sided terms in a {}", profile.name),
      severity: Severity::Medium,
      weight: TYPE_FACTOR_WEIGHT,
    });
  }
  out
}

fn summarize(level: RiskLevel, name: &str, count: usize) -> String {
  let items = if count == 1 {
    "1 item".to_string()
  } else {
    format!("{} items", count)
  };
  match level {
    RiskLevel::Low => format!(
      "This {} looks fairly standard. We flagged {} worth a quick look.",
      name, items
    ),
    RiskLevel::Moderate => format!(
      "This {} has some terms to watch. We flagged {} to review before agreeing.",
      name, items
    ),
    RiskLevel::High => format!(
      "This {} contains significant risks. We flagged {} that could work against you.",
      name, items
    ),
    RiskLevel::Critical => format!(
      "This {} contains serious risks. We flagged {}; consider getting legal advice before signing.",
      name, items
    ),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn run(text: &str, type_id: &str) -> RiskAssessment {
    score(text, type_id, &PatternLibrary::builtin(), &ScoringConfig::default())
  }

  #[test]
  fn arbitration_class_action_waiver_is_moderate() {
    let text = "Any dispute is resolved by binding arbitration. You waive any class action.";
    let a = run(text, "unknown");
    assert!((a.raw_score - 7.0).abs() < 1e-9);
    assert_eq!(a.normalized_score, 6);
    assert_eq!(a.level, RiskLevel::Moderate);
    let patterns: Vec<_> = a.evidence.iter().map(|e| e.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["binding arbitration", "class action", "waive"]);
    assert!(a.evidence.iter().all(|e| e.severity == Severity::High));
  }

  #[test]
  fn empty_text_scores_zero() {
    let a = run("", "privacy_policy");
    assert_eq!(a.raw_score, 0.0);
    assert_eq!(a.normalized_score, 0);
    assert_eq!(a.level, RiskLevel::Low);
    assert!(a.full_evidence().is_empty());
    assert!(a.summary.contains("Privacy Policy"));
    assert!(a.summary.contains("0 items"));
  }

  #[test]
  fn sub_two_weights_are_medium_severity() {
    let a = run("Fees are charged at our sole discretion.", "unknown");
    assert_eq!(a.evidence.len(), 1);
    assert_eq!(a.evidence[0].severity, Severity::Medium);
    assert_eq!(a.normalized_score, 1);
  }

  #[test]
  fn profile_phrases_follow_universal_rules_and_skip_overlaps() {
    let text = "We may sell your data, share with third parties, and use tracking and location data.";
    let a = run(text, "privacy_policy");
    let patterns: Vec<_> = a.full_evidence().iter().map(|e| e.pattern.as_str()).collect();
    assert_eq!(
      patterns,
      vec!["sell your", "share with third part", "tracking", "location data"]
    );
    assert!(a.evidence[2].description.contains("Privacy Policy"));
    assert_eq!(a.evidence[2].severity, Severity::Medium);
    assert!((a.raw_score - 10.5).abs() < 1e-9);
  }

  #[test]
  fn selling_and_sharing_data_alone_is_high_risk() {
    let text = "This privacy policy covers the personal information we hold. \
                We may sell your details and share with third parties.";
    let a = run(text, "privacy_policy");
    let patterns: Vec<_> = a.full_evidence().iter().map(|e| e.pattern.as_str()).collect();
    assert_eq!(patterns, vec!["sell your", "share with third part"]);
    assert!((a.raw_score - 8.5).abs() < 1e-9);
    assert_eq!(a.normalized_score, 7);
    assert_eq!(a.level, RiskLevel::High);
  }

  #[test]
  fn unrecognized_type_uses_no_profile_phrases() {
    let text = "We use tracking and location data.";
    let a = run(text, "not_a_type");
    assert!(a.full_evidence().is_empty());
    assert!(a.summary.contains("Unclassified Document"));
  }

  #[test]
  fn long_sentences_add_low_severity_surcharge() {
    let text = vec!["word"; 40].join(" ");
    let a = run(&text, "unknown");
    assert_eq!(a.evidence.len(), 1);
    assert_eq!(a.evidence[0].pattern, COMPLEXITY_PATTERN);
    assert_eq!(a.evidence[0].severity, Severity::Low);
    assert_eq!(a.normalized_score, 1);

    let split = format!("{}. {}.", vec!["word"; 20].join(" "), vec!["word"; 20].join(" "));
    assert!(run(&split, "unknown").evidence.is_empty());
  }

  #[test]
  fn average_sentence_length_ignores_empty_fragments() {
    assert_eq!(average_sentence_length(""), 0.0);
    assert_eq!(average_sentence_length("One two. Three four!!"), 2.0);
    assert_eq!(average_sentence_length("no terminator at all"), 4.0);
  }

  #[test]
  fn evidence_display_is_truncated_but_score_uses_everything() {
    let text = "binding arbitration, class action, waive, sell your, share with third part, \
                jury trial, indemnify, hold harmless, non-compete, liquidated damages, \
                automatic renewal, non-refundable";
    let a = run(text, "unknown");
    assert_eq!(a.full_evidence().len(), 12);
    assert_eq!(a.evidence.len(), 10);
    assert_eq!(a.evidence_count, 12);
    assert!((a.raw_score - 29.5).abs() < 1e-9);
    assert_eq!(a.normalized_score, 10);
    assert_eq!(a.level, RiskLevel::Critical);
    let shown: f64 = a.evidence.iter().map(|e| e.weight).sum();
    assert!(a.raw_score >= shown);
    assert!(a.summary.contains("12 items"));
  }

  #[test]
  fn normalize_score_rounds_and_clamps() {
    assert_eq!(normalize_score(0.0, 0.8), 0);
    assert_eq!(normalize_score(7.0, 0.8), 6);
    assert_eq!(normalize_score(1.5, 0.8), 1);
    assert_eq!(normalize_score(100.0, 0.8), 10);
  }
}
