//! Errors raised by the history ledger.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
  #[error("invalid capacity {0}: must be at least 1")]
  InvalidCapacity(usize),
}
