//! Aggregate statistics over ledger entries.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::ledger::HistoryEntry;

/// Window for `count_last_7_days`.
pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerStats {
  pub total: usize,
  /// Mean normalized risk score, one decimal; 0.0 when empty.
  pub avg_risk_score: f64,
  /// Entries stamped within the last seven days up to `now`.
  pub count_last_7_days: usize,
  pub count_by_type: BTreeMap<String, usize>,
}

pub(crate) fn compute<'a>(
  entries: impl Iterator<Item = &'a HistoryEntry>,
  now: DateTime<Utc>,
) -> LedgerStats {
  let window_start = now - Duration::days(RECENT_WINDOW_DAYS);
  let mut total = 0usize;
  let mut score_sum = 0u64;
  let mut count_last_7_days = 0usize;
  let mut count_by_type: BTreeMap<String, usize> = BTreeMap::new();

  for entry in entries {
    total += 1;
    score_sum += u64::from(entry.assessment.normalized_score);
    if entry.timestamp >= window_start && entry.timestamp <= now {
      count_last_7_days += 1;
    }
    *count_by_type
      .entry(entry.classification.type_id.clone())
      .or_insert(0) += 1;
  }

  let avg_risk_score = if total == 0 {
    0.0
  } else {
    (score_sum as f64 / total as f64 * 10.0).round() / 10.0
  };

  LedgerStats {
    total,
    avg_risk_score,
    count_last_7_days,
    count_by_type,
  }
}
