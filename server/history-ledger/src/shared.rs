//! Cloneable handle for a ledger shared between callers.
//!
//! Appends are serialized through a mutex. Readers hold the lock only long
//! enough to grab a snapshot, then read without it.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use scoring_engine::{ClassificationResult, RiskAssessment};

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::ledger::{HistoryLedger, Metadata, Snapshot};
use crate::stats::LedgerStats;

#[derive(Debug, Clone)]
pub struct SharedLedger {
  inner: Arc<Mutex<HistoryLedger>>,
}

impl SharedLedger {
  pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
    Ok(Self::from_ledger(HistoryLedger::new(config)?))
  }

  pub fn from_ledger(ledger: HistoryLedger) -> Self {
    Self {
      inner: Arc::new(Mutex::new(ledger)),
    }
  }

  pub fn append(
    &self,
    classification: ClassificationResult,
    assessment: RiskAssessment,
    metadata: Option<Metadata>,
  ) {
    self.lock().append(classification, assessment, metadata);
  }

  pub fn append_at(
    &self,
    timestamp: DateTime<Utc>,
    classification: ClassificationResult,
    assessment: RiskAssessment,
    metadata: Option<Metadata>,
  ) {
    self
      .lock()
      .append_at(timestamp, classification, assessment, metadata);
  }

  pub fn snapshot(&self) -> Snapshot {
    self.lock().all()
  }

  pub fn stats(&self) -> LedgerStats {
    self.snapshot().stats_at(Utc::now())
  }

  // A panic mid-append cannot leave the deque half-written, so a poisoned
  // lock still guards consistent data.
  fn lock(&self) -> MutexGuard<'_, HistoryLedger> {
    match self.inner.lock() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    }
  }
}

impl Default for SharedLedger {
  fn default() -> Self {
    Self::from_ledger(HistoryLedger::with_defaults())
  }
}
