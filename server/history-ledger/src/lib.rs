//! Bounded history of scoring results with simple aggregate statistics.
//!
//! Appends need exclusive access (`&mut HistoryLedger`, or the mutex inside
//! [`SharedLedger`]) so eviction order stays deterministic. Reads work on
//! [`Snapshot`]s that later appends never change.

pub mod config;
pub mod error;
pub mod ledger;
pub mod shared;
pub mod stats;

pub use config::{LedgerConfig, DEFAULT_CAPACITY};
pub use error::LedgerError;
pub use ledger::{HistoryEntry, HistoryLedger, Metadata, Snapshot};
pub use shared::SharedLedger;
pub use stats::LedgerStats;
