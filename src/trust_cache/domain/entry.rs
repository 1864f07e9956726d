//! A single verified endpoint record.

use super::timestamp::{self, to_stored_precision};
use crate::discovery::domain::{DiscoveryCriteria, RegistryItem};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Hours during which a cached entry is not re-recorded.
pub const FRESHNESS_WINDOW_HOURS: i64 = 72;

/// Returns the freshness window as a duration.
#[must_use]
pub fn freshness_window() -> TimeDelta {
    TimeDelta::hours(FRESHNESS_WINDOW_HOURS)
}

/// A registry item that passed the trust policy, with the time it was
/// recorded and the criteria used to discover it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    mcp_endpoint: String,
    met_protocol_criteria: bool,
    #[serde(with = "timestamp::serde_format")]
    last_cached: DateTime<Utc>,
    criteria: DiscoveryCriteria,
    data_item: RegistryItem,
}

impl CacheEntry {
    /// Records `item` as verified at `now`.
    #[must_use]
    pub fn new(item: RegistryItem, criteria: DiscoveryCriteria, now: DateTime<Utc>) -> Self {
        Self {
            mcp_endpoint: item.url().to_owned(),
            met_protocol_criteria: true,
            last_cached: to_stored_precision(now),
            criteria,
            data_item: item,
        }
    }

    /// Returns the cached endpoint URL.
    #[must_use]
    pub fn mcp_endpoint(&self) -> &str {
        &self.mcp_endpoint
    }

    /// Returns whether the item met the policy when it was recorded.
    #[must_use]
    pub const fn met_protocol_criteria(&self) -> bool {
        self.met_protocol_criteria
    }

    /// Returns when the entry was recorded.
    #[must_use]
    pub const fn last_cached(&self) -> DateTime<Utc> {
        self.last_cached
    }

    /// Returns the discovery criteria snapshot.
    #[must_use]
    pub const fn criteria(&self) -> &DiscoveryCriteria {
        &self.criteria
    }

    /// Returns the registry item snapshot.
    #[must_use]
    pub const fn data_item(&self) -> &RegistryItem {
        &self.data_item
    }

    /// Returns the registry identifier the entry is keyed by.
    #[must_use]
    pub fn item_id(&self) -> &str {
        self.data_item.id()
    }

    /// Returns whether the entry is younger than the freshness window at
    /// `now`.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.last_cached) < freshness_window()
    }
}
