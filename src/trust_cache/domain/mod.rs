//! Domain types for the trust cache.

mod entry;
mod ledger;
pub mod timestamp;

pub use entry::{CacheEntry, FRESHNESS_WINDOW_HOURS, freshness_window};
pub use ledger::{LedgerDecodeError, TrustLedger, UnreadableEntry, UpsertOutcome};
