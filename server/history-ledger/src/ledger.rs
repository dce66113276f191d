//! Append-only, capacity-bounded ledger of scoring results (most recent first).

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use scoring_engine::{ClassificationResult, RiskAssessment};
use serde::Serialize;

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::stats::{self, LedgerStats};

/// Free-form caller annotations (file name, source, ...).
pub type Metadata = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
  pub timestamp: DateTime<Utc>,
  pub classification: ClassificationResult,
  pub assessment: RiskAssessment,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub metadata: Option<Metadata>,
}

/// Point-in-time view of the ledger, most recent first.
#[derive(Debug, Clone)]
pub struct Snapshot {
  entries: Arc<VecDeque<HistoryEntry>>,
}

impl Snapshot {
  pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn latest(&self) -> Option<&HistoryEntry> {
    self.entries.front()
  }

  pub fn to_vec(&self) -> Vec<HistoryEntry> {
    self.entries.iter().cloned().collect()
  }

  pub fn stats_at(&self, now: DateTime<Utc>) -> LedgerStats {
    stats::compute(self.entries.iter(), now)
  }
}

#[derive(Debug, Clone)]
pub struct HistoryLedger {
  capacity: usize,
  entries: Arc<VecDeque<HistoryEntry>>,
}

impl HistoryLedger {
  pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
    if config.capacity == 0 {
      return Err(LedgerError::InvalidCapacity(config.capacity));
    }
    Ok(Self {
      capacity: config.capacity,
      entries: Arc::new(VecDeque::with_capacity(config.capacity + 1)),
    })
  }

  pub fn with_defaults() -> Self {
    Self {
      capacity: crate::config::DEFAULT_CAPACITY,
      entries: Arc::new(VecDeque::new()),
    }
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Record a result stamped with the current time.
  pub fn append(
    &mut self,
    classification: ClassificationResult,
    assessment: RiskAssessment,
    metadata: Option<Metadata>,
  ) -> &HistoryEntry {
    self.append_at(Utc::now(), classification, assessment, metadata)
  }

  /// Record a result with an explicit timestamp. The new entry goes to the
  /// front; anything past capacity is evicted from the back.
  pub fn append_at(
    &mut self,
    timestamp: DateTime<Utc>,
    classification: ClassificationResult,
    assessment: RiskAssessment,
    metadata: Option<Metadata>,
  ) -> &HistoryEntry {
    // Copies the deque only while an older snapshot still shares it.
    let entries = Arc::make_mut(&mut self.entries);
    entries.push_front(HistoryEntry {
      timestamp,
      classification,
      assessment,
      metadata,
    });
    while entries.len() > self.capacity {
      if let Some(evicted) = entries.pop_back() {
        tracing::debug!(
          type_id = %evicted.classification.type_id,
          timestamp = %evicted.timestamp,
          capacity = self.capacity,
          "evicted oldest history entry"
        );
      }
    }
    &entries[0]
  }

  /// Most recent first.
  pub fn all(&self) -> Snapshot {
    Snapshot {
      entries: Arc::clone(&self.entries),
    }
  }

  pub fn latest(&self) -> Option<&HistoryEntry> {
    self.entries.front()
  }

  pub fn clear(&mut self) {
    self.entries = Arc::new(VecDeque::new());
  }

  pub fn stats(&self) -> LedgerStats {
    self.stats_at(Utc::now())
  }

  pub fn stats_at(&self, now: DateTime<Utc>) -> LedgerStats {
    stats::compute(self.entries.iter(), now)
  }
}

impl Default for HistoryLedger {
  fn default() -> Self {
    Self::with_defaults()
  }
}
