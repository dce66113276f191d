//! Integration tests for the scoring engine.

use std::collections::HashMap;

use proptest::prelude::*;
use scoring_engine::{
  request, ComplexityLevel, ComplexityReport, Dimension, Engine, RiskLevel, ScoringError,
};

const PRIVACY_TEXT: &str = "Privacy Policy. We collect personal information and location data \
  through cookies and tracking pixels. We may sell your data and share with third parties. \
  We retain records indefinitely.";

#[test]
fn arbitration_clause_scores_moderate() {
  let engine = Engine::with_defaults();
  let a = engine.score(
    "All disputes go to binding arbitration and you waive any class action.",
    "unknown",
  );
  assert!((a.raw_score - 7.0).abs() < 1e-9);
  assert_eq!(a.normalized_score, 6);
  assert_eq!(a.level, RiskLevel::Moderate);
}

#[test]
fn minimal_privacy_policy_selling_data_is_high_risk() {
  let engine = Engine::with_defaults();
  let analysis = engine.analyze(
    "This privacy policy covers the personal information we hold. \
     We may sell your details and share with third parties.",
  );
  assert_eq!(analysis.classification.type_id, "privacy_policy");
  assert_eq!(analysis.classification.match_count, 2);

  let a = &analysis.assessment;
  let patterns: Vec<_> = a.evidence.iter().map(|e| e.pattern.as_str()).collect();
  assert_eq!(patterns, vec!["sell your", "share with third part"]);
  assert!(matches!(a.level, RiskLevel::High | RiskLevel::Critical));
  assert_eq!(a.normalized_score, 7);
}

#[test]
fn privacy_policy_with_tracking_is_critical() {
  let engine = Engine::with_defaults();
  let analysis = engine.analyze(PRIVACY_TEXT);
  assert_eq!(analysis.classification.type_id, "privacy_policy");
  assert_eq!(analysis.classification.match_count, 3);

  let a = &analysis.assessment;
  let patterns: Vec<_> = a.evidence.iter().map(|e| e.pattern.as_str()).collect();
  assert!(patterns.contains(&"sell your"));
  assert!(patterns.contains(&"share with third part"));
  assert_eq!(a.level, RiskLevel::Critical);
  assert_eq!(a.normalized_score, 9);
  assert!(a.summary.contains("Privacy Policy"));
  assert!(a.summary.contains("5 items"));
}

#[test]
fn complexity_worked_example() {
  let engine = Engine::with_defaults();
  let scores: HashMap<&str, i64> = HashMap::from([
    ("stepCount", 8),
    ("timeRequired", 7),
    ("documentBurden", 6),
    ("agencyTouchpoints", 5),
    ("cost", 6),
    ("languageComplexity", 7),
    ("errorRisk", 6),
    ("accessibility", 5),
  ]);
  let r = engine.aggregate(scores).unwrap();
  assert_eq!(r.weighted_total, 6.5);
  assert_eq!(r.level, ComplexityLevel::High);
}

#[test]
fn complexity_arity_and_range_errors() {
  let engine = Engine::with_defaults();
  let base: Vec<(&str, i64)> = Dimension::ALL.iter().map(|d| (d.as_str(), 5)).collect();

  let seven = base[..7].to_vec();
  assert!(matches!(engine.aggregate(seven), Err(ScoringError::InvalidInput { .. })));

  let mut nine = base.clone();
  nine.push(("extra", 5));
  assert!(matches!(engine.aggregate(nine), Err(ScoringError::InvalidInput { .. })));

  for bad in [0, 11] {
    let mut scores = base.clone();
    scores[2].1 = bad;
    assert!(matches!(engine.aggregate(scores), Err(ScoringError::OutOfRange { .. })));
  }
}

#[test]
fn json_request_round_trip() {
  let engine = Engine::with_defaults();
  let raw = serde_json::json!({
    "text": PRIVACY_TEXT,
    "dimensions": {
      "stepCount": 8, "timeRequired": 7, "documentBurden": 6, "agencyTouchpoints": 5,
      "cost": 6, "languageComplexity": 7, "errorRisk": 6, "accessibility": 5
    }
  })
  .to_string();
  let out = engine.handle(&request::parse(&raw).unwrap());
  let json = serde_json::to_value(&out).unwrap();

  assert_eq!(json["classification"]["type_id"], "privacy_policy");
  assert_eq!(json["assessment"]["level"], "critical");
  assert_eq!(json["complexity"]["level"], "high");
  assert_eq!(json["complexity"]["scores"]["stepCount"], 8);

  let report_json = serde_json::to_string(&json["complexity"]).unwrap();
  let report = ComplexityReport::from_json(&report_json).unwrap();
  assert_eq!(Some(report), out.complexity);
}

#[test]
fn non_string_text_is_rejected_at_the_boundary() {
  let err = request::parse(r#"{"text": 12345}"#).unwrap_err();
  assert!(matches!(err, ScoringError::InvalidInput { .. }));
}

#[test]
fn deterministic_output_across_engines() {
  let a = serde_json::to_string(&Engine::with_defaults().analyze(PRIVACY_TEXT)).unwrap();
  let b = serde_json::to_string(&Engine::with_defaults().analyze(PRIVACY_TEXT)).unwrap();
  assert_eq!(a, b, "Same inputs must produce identical JSON output");
}

#[test]
fn engine_can_be_called_from_many_threads() {
  let engine = std::sync::Arc::new(Engine::with_defaults());
  let expected = engine.analyze(PRIVACY_TEXT);
  let handles: Vec<_> = (0..4)
    .map(|_| {
      let engine = engine.clone();
      std::thread::spawn(move || engine.analyze(PRIVACY_TEXT))
    })
    .collect();
  for h in handles {
    assert_eq!(h.join().unwrap(), expected);
  }
}

fn dimension_scores() -> impl Strategy<Value = Vec<(&'static str, i64)>> {
  proptest::collection::vec(1i64..=10, 8).prop_map(|values| {
    Dimension::ALL
      .iter()
      .map(|d| d.as_str())
      .zip(values)
      .collect()
  })
}

proptest! {
  #[test]
  fn risk_score_is_bounded(text in "\\PC{0,400}") {
    let engine = Engine::with_defaults();
    let analysis = engine.analyze(&text);
    prop_assert!(analysis.assessment.normalized_score <= 10);
    prop_assert!(analysis.assessment.raw_score >= 0.0);
    let shown: f64 = analysis.assessment.evidence.iter().map(|e| e.weight).sum();
    prop_assert!(analysis.assessment.raw_score + 1e-9 >= shown);
  }

  #[test]
  fn appending_a_risk_phrase_never_lowers_raw_score(
    text in "[a-z ]{0,200}",
    rule in 0usize..20,
  ) {
    let engine = Engine::with_defaults();
    let phrase = engine.library().rules()[rule].pattern.clone();
    let before = engine.score(&text, "privacy_policy");
    let after = engine.score(&format!("{} {}", text, phrase), "privacy_policy");
    prop_assert!(after.raw_score >= before.raw_score);
  }

  #[test]
  fn classification_and_scoring_are_deterministic(text in "\\PC{0,300}") {
    let engine = Engine::with_defaults();
    prop_assert_eq!(engine.classify(&text), engine.classify(&text));
    prop_assert_eq!(engine.score(&text, "nda"), engine.score(&text, "nda"));
  }

  #[test]
  fn weighted_total_is_bounded_and_order_independent(scores in dimension_scores()) {
    let engine = Engine::with_defaults();
    let forward = engine.aggregate(scores.clone()).unwrap();
    let mut reversed = scores;
    reversed.reverse();
    let backward = engine.aggregate(reversed).unwrap();
    prop_assert_eq!(forward, backward);
    prop_assert!((1.0..=10.0).contains(&forward.weighted_total));
    prop_assert_eq!(forward.level, ComplexityLevel::from_total(forward.weighted_total));
  }
}
