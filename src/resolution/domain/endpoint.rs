//! The endpoint chosen by a resolution.

use crate::discovery::domain::RegistryItem;
use crate::trust_cache::domain::CacheEntry;
use std::fmt;

/// Where a resolved endpoint came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionSource {
    /// The registry returned a qualifying item.
    LiveDiscovery,
    /// A cached entry still passes the current policy.
    TrustCache,
}

impl ResolutionSource {
    /// Returns a stable label for log events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LiveDiscovery => "live",
            Self::TrustCache => "cache",
        }
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A trusted endpoint with a description of the item behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEndpoint {
    url: String,
    source: ResolutionSource,
    item_id: String,
    item_name: String,
    relevance_score: f64,
    uptime: f64,
}

impl ResolvedEndpoint {
    /// Describes a live registry match.
    #[must_use]
    pub fn from_live(item: &RegistryItem) -> Self {
        Self::describe(item.url(), ResolutionSource::LiveDiscovery, item)
    }

    /// Describes a trust cache match.
    #[must_use]
    pub fn from_cache(entry: &CacheEntry) -> Self {
        Self::describe(
            entry.mcp_endpoint(),
            ResolutionSource::TrustCache,
            entry.data_item(),
        )
    }

    fn describe(url: &str, source: ResolutionSource, item: &RegistryItem) -> Self {
        Self {
            url: url.to_owned(),
            source,
            item_id: item.id().to_owned(),
            item_name: item.name().to_owned(),
            relevance_score: item.relevance_score(),
            uptime: item.uptime(),
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns where the endpoint came from.
    #[must_use]
    pub const fn source(&self) -> ResolutionSource {
        self.source
    }

    /// Returns the registry item id.
    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Returns the registry item name.
    #[must_use]
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Returns the item's relevance score.
    #[must_use]
    pub const fn relevance_score(&self) -> f64 {
        self.relevance_score
    }

    /// Returns the item's uptime.
    #[must_use]
    pub const fn uptime(&self) -> f64 {
        self.uptime
    }

    /// Consumes the endpoint, returning its URL.
    #[must_use]
    pub fn into_url(self) -> String {
        self.url
    }
}
