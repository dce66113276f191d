//! Ledger configuration.

use serde::Deserialize;

/// Entries kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
  pub capacity: usize,
}

impl Default for LedgerConfig {
  fn default() -> Self {
    Self {
      capacity: DEFAULT_CAPACITY,
    }
  }
}
