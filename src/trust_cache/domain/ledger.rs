//! The persisted collection of cache entries.

use super::CacheEntry;
use crate::discovery::domain::{DiscoveryCriteria, RegistryItem};
use crate::policy::domain::{TrustQualifiers, passes};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

const ENTRIES_KEY: &str = "cached_mcp";

/// Effect of recording a verified item in a [`TrustLedger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No entry existed for the item; one was appended.
    Inserted,
    /// A stale entry was replaced in place.
    Replaced,
    /// A fresh entry already existed and was left unchanged.
    Fresh,
}

impl UpsertOutcome {
    /// Returns whether the ledger was modified.
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Fresh)
    }

    /// Returns a stable label for log events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Replaced => "replaced",
            Self::Fresh => "fresh",
        }
    }
}

/// Errors raised when a persisted ledger cannot be decoded at all.
#[derive(Debug, Error)]
pub enum LedgerDecodeError {
    /// The contents are not JSON.
    #[error("trust cache is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON document does not have the ledger layout.
    #[error("trust cache has an unexpected layout: {0}")]
    Layout(&'static str),
}

/// A stored entry that could not be decoded.
///
/// The raw value is written back on save so that it is never dropped
/// silently.
#[derive(Debug, Clone, PartialEq)]
pub struct UnreadableEntry {
    position: usize,
    reason: String,
    raw: Value,
}

impl UnreadableEntry {
    /// Returns the entry's index in the stored `cached_mcp` list.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the decoder's explanation.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns the stored value as found.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    fn item_id(&self) -> Option<&str> {
        self.raw.pointer("/data_item/id").and_then(Value::as_str)
    }
}

/// Ordered cache entries, at most one per registry item id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrustLedger {
    entries: Vec<CacheEntry>,
    unreadable: Vec<UnreadableEntry>,
}

impl TrustLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            unreadable: Vec::new(),
        }
    }

    /// Decodes a persisted ledger.
    ///
    /// A document without `cached_mcp` (or with `cached_mcp: null`) is an
    /// empty ledger. Entries that fail to decode are kept aside as
    /// [`UnreadableEntry`] values; the remaining entries stay usable.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDecodeError`] when `contents` is not JSON, is not a
    /// JSON object, or carries a non-array `cached_mcp` member.
    pub fn from_json_str(contents: &str) -> Result<Self, LedgerDecodeError> {
        let document: Value = serde_json::from_str(contents)?;
        let Value::Object(mut root) = document else {
            return Err(LedgerDecodeError::Layout("document is not a JSON object"));
        };

        let stored = match root.remove(ENTRIES_KEY) {
            None | Some(Value::Null) => return Ok(Self::new()),
            Some(Value::Array(stored)) => stored,
            Some(_) => {
                return Err(LedgerDecodeError::Layout("`cached_mcp` member is not an array"));
            }
        };

        let mut ledger = Self::new();
        for (position, raw) in stored.into_iter().enumerate() {
            match serde_json::from_value::<CacheEntry>(raw.clone()) {
                Ok(entry) => ledger.entries.push(entry),
                Err(err) => ledger.unreadable.push(UnreadableEntry {
                    position,
                    reason: err.to_string(),
                    raw,
                }),
            }
        }
        Ok(ledger)
    }

    /// Encodes the ledger for persistence.
    ///
    /// Unreadable entries follow the decoded ones.
    ///
    /// # Errors
    ///
    /// Returns the encoder error when serialization fails.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let mut stored = self
            .entries
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        stored.extend(self.unreadable.iter().map(|entry| entry.raw.clone()));

        let mut root = Map::new();
        root.insert(ENTRIES_KEY.to_owned(), Value::Array(stored));
        serde_json::to_string_pretty(&Value::Object(root))
    }

    /// Returns entries in stored order.
    #[must_use]
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    /// Returns stored entries that could not be decoded.
    #[must_use]
    pub fn unreadable(&self) -> &[UnreadableEntry] {
        &self.unreadable
    }

    /// Returns the number of decoded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the ledger has no decoded entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry recorded for `item_id`.
    #[must_use]
    pub fn get(&self, item_id: &str) -> Option<&CacheEntry> {
        self.entries.iter().find(|entry| entry.item_id() == item_id)
    }

    /// Records `item` as verified at `now`.
    ///
    /// A fresh entry for the same id is kept as is. A stale one is replaced
    /// at its current position; otherwise the new entry is appended. An
    /// unreadable entry carrying the same id is superseded and dropped.
    pub fn upsert(
        &mut self,
        item: &RegistryItem,
        criteria: &DiscoveryCriteria,
        now: DateTime<Utc>,
    ) -> UpsertOutcome {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.item_id() == item.id());
        let outcome = match position.and_then(|index| self.entries.get_mut(index)) {
            Some(existing) if existing.is_fresh(now) => UpsertOutcome::Fresh,
            Some(existing) => {
                *existing = CacheEntry::new(item.clone(), criteria.clone(), now);
                UpsertOutcome::Replaced
            }
            None => {
                self.entries
                    .push(CacheEntry::new(item.clone(), criteria.clone(), now));
                UpsertOutcome::Inserted
            }
        };
        if outcome.changed() {
            self.unreadable
                .retain(|entry| entry.item_id() != Some(item.id()));
        }
        outcome
    }

    /// Returns the first entry, in stored order, whose item passes the
    /// current qualifiers.
    ///
    /// The stored `met_protocol_criteria` flag is not consulted; entries are
    /// re-evaluated so that a tightened policy excludes them.
    #[must_use]
    pub fn first_passing_entry(&self, qualifiers: &TrustQualifiers) -> Option<&CacheEntry> {
        self.entries
            .iter()
            .find(|entry| passes(entry.data_item(), qualifiers))
    }
}
