//! Document-type classification by counting distinct pattern hits per profile.

use crate::config::ScoringConfig;
use crate::patterns::{PatternLibrary, UNKNOWN_TYPE_ID};
use crate::types::ClassificationResult;

/// Classify `text` against the library's profiles.
///
/// - Each pattern counts at most once, case-insensitively.
/// - The strictly highest count wins; ties go to the profile declared first.
/// - A winner below `min_classification_matches`, or text shorter than
///   `min_text_chars`, yields `unknown`.
pub fn classify(text: &str, library: &PatternLibrary, config: &ScoringConfig) -> ClassificationResult {
  if text.trim().chars().count() < config.min_text_chars {
    return unknown(0);
  }

  let lower = text.to_lowercase();
  let mut best: Option<(&str, usize)> = None;
  for profile in library.profiles() {
    let count = count_matches(&lower, &profile.patterns);
    match best {
      Some((_, best_count)) if count <= best_count => {}
      _ => best = Some((profile.id.as_str(), count)),
    }
  }

  match best {
    Some((type_id, count)) if count >= config.min_classification_matches => ClassificationResult {
      type_id: type_id.to_string(),
      match_count: count,
    },
    Some((_, count)) => unknown(count),
    None => unknown(0),
  }
}

/// Number of distinct `patterns` present in already-lowercased text.
pub fn count_matches(lower_text: &str, patterns: &[String]) -> usize {
  patterns.iter().filter(|p| lower_text.contains(p.as_str())).count()
}

fn unknown(match_count: usize) -> ClassificationResult {
  ClassificationResult {
    type_id: UNKNOWN_TYPE_ID.to_string(),
    match_count,
  }
}
