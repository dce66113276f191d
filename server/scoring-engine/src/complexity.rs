//! Complexity Index: eight 1-10 dimension ratings combined with fixed weights.
//!
//! Weights are held in hundredths so the weighted sum is exact and the
//! one-decimal round-half-up never suffers float drift (6.45 -> 6.5).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

pub const MIN_DIMENSION_SCORE: i64 = 1;
pub const MAX_DIMENSION_SCORE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
  StepCount,
  TimeRequired,
  DocumentBurden,
  AgencyTouchpoints,
  Cost,
  LanguageComplexity,
  ErrorRisk,
  Accessibility,
}

impl Dimension {
  /// Canonical order.
  pub const ALL: [Dimension; 8] = [
    Self::StepCount,
    Self::TimeRequired,
    Self::DocumentBurden,
    Self::AgencyTouchpoints,
    Self::Cost,
    Self::LanguageComplexity,
    Self::ErrorRisk,
    Self::Accessibility,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::StepCount => "stepCount",
      Self::TimeRequired => "timeRequired",
      Self::DocumentBurden => "documentBurden",
      Self::AgencyTouchpoints => "agencyTouchpoints",
      Self::Cost => "cost",
      Self::LanguageComplexity => "languageComplexity",
      Self::ErrorRisk => "errorRisk",
      Self::Accessibility => "accessibility",
    }
  }

  pub fn from_key(key: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|d| d.as_str() == key)
  }

  /// Weight in hundredths; the eight weights sum to exactly 100.
  pub fn weight_hundredths(self) -> u32 {
    match self {
      Self::StepCount => 15,
      Self::TimeRequired => 20,
      Self::DocumentBurden => 15,
      Self::AgencyTouchpoints => 10,
      Self::Cost => 15,
      Self::LanguageComplexity => 10,
      Self::ErrorRisk => 10,
      Self::Accessibility => 5,
    }
  }

  pub fn weight(self) -> f64 {
    self.weight_hundredths() as f64 / 100.0
  }
}

impl fmt::Display for Dimension {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplexityLevel {
  Low,
  Moderate,
  High,
  VeryHigh,
}

impl ComplexityLevel {
  /// low <= 3, moderate <= 5, high <= 7, very-high above.
  pub fn from_total(total: f64) -> Self {
    if total <= 3.0 {
      Self::Low
    } else if total <= 5.0 {
      Self::Moderate
    } else if total <= 7.0 {
      Self::High
    } else {
      Self::VeryHigh
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Moderate => "moderate",
      Self::High => "high",
      Self::VeryHigh => "very-high",
    }
  }
}

impl fmt::Display for ComplexityLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityResult {
  /// Weighted sum rounded half-up to one decimal, 0..=10.
  pub weighted_total: f64,
  pub level: ComplexityLevel,
}

/// A validated rating for every canonical dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, i64>")]
pub struct DimensionScores(BTreeMap<Dimension, u8>);

impl TryFrom<BTreeMap<String, i64>> for DimensionScores {
  type Error = ScoringError;

  fn try_from(map: BTreeMap<String, i64>) -> Result<Self, Self::Error> {
    Self::from_pairs(map)
  }
}

impl DimensionScores {
  /// Validate keyed ratings.
  ///
  /// Key problems (unknown, duplicate, missing) are `InvalidInput` and are
  /// reported before any value is range-checked; a value outside 1..=10 is
  /// `OutOfRange`. Nothing is clamped or defaulted.
  pub fn from_pairs<I, K>(pairs: I) -> Result<Self, ScoringError>
  where
    I: IntoIterator<Item = (K, i64)>,
    K: AsRef<str>,
  {
    let mut raw: BTreeMap<Dimension, i64> = BTreeMap::new();
    for (key, value) in pairs {
      let key = key.as_ref();
      let dim = Dimension::from_key(key)
        .ok_or_else(|| ScoringError::invalid_input(key, "unknown dimension"))?;
      if raw.insert(dim, value).is_some() {
        return Err(ScoringError::invalid_input(key, "duplicate dimension"));
      }
    }

    let missing: Vec<&str> = Dimension::ALL
      .iter()
      .filter(|d| !raw.contains_key(*d))
      .map(|d| d.as_str())
      .collect();
    if !missing.is_empty() {
      return Err(ScoringError::invalid_input(
        "dimensions",
        &format!("missing {}", missing.join(", ")),
      ));
    }

    let mut scores = BTreeMap::new();
    for (dim, value) in raw {
      if !(MIN_DIMENSION_SCORE..=MAX_DIMENSION_SCORE).contains(&value) {
        return Err(ScoringError::out_of_range(dim.as_str(), value));
      }
      scores.insert(dim, value as u8);
    }
    Ok(Self(scores))
  }

  /// Every canonical dimension is present once `from_pairs` succeeds.
  pub fn get(&self, dim: Dimension) -> u8 {
    self.0[&dim]
  }

  /// Ratings in canonical order.
  pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
    self.0.iter().map(|(d, v)| (*d, *v))
  }

  pub fn aggregate(&self) -> ComplexityResult {
    let hundredths: u32 = self
      .iter()
      .map(|(dim, value)| u32::from(value) * dim.weight_hundredths())
      .sum();
    // Round half-up from hundredths to tenths.
    let tenths = (hundredths + 5) / 10;
    let weighted_total = f64::from(tenths.min(100)) / 10.0;
    ComplexityResult {
      weighted_total,
      level: ComplexityLevel::from_total(weighted_total),
    }
  }
}

/// Validate and aggregate keyed ratings. Order of `scores` does not matter.
pub fn aggregate<I, K>(scores: I) -> Result<ComplexityResult, ScoringError>
where
  I: IntoIterator<Item = (K, i64)>,
  K: AsRef<str>,
{
  Ok(DimensionScores::from_pairs(scores)?.aggregate())
}
