//! Audit record of a single resolution.

use super::ResolvedEndpoint;
use crate::discovery::domain::DiscoveryError;
use crate::trust_cache::domain::UpsertOutcome;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of the live discovery phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LivePhaseOutcome {
    /// A registry item passed every qualifier.
    Matched {
        /// Id of the matching item.
        item_id: String,
    },
    /// The registry answered but no item qualified.
    NoQualifyingItem {
        /// Number of well-formed items returned.
        candidates: usize,
    },
    /// The registry could not be queried or its response was unusable.
    Failed(DiscoveryError),
}

impl LivePhaseOutcome {
    /// Returns a stable label for log events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Matched { .. } => "matched",
            Self::NoQualifyingItem { .. } => "no_match",
            Self::Failed(_) => "failed",
        }
    }
}

/// What happened to the trust cache after a live match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheUpdate {
    /// No live match, so nothing was recorded.
    NotAttempted,
    /// Caching is disabled for this resolution.
    Disabled,
    /// The match was recorded.
    Recorded(UpsertOutcome),
    /// Recording failed; resolution carried on.
    Failed(String),
}

/// The phase that ended the resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionPhase {
    /// Live discovery produced the endpoint.
    Live,
    /// The trust cache produced the endpoint.
    CacheFallback,
    /// Neither source produced an endpoint.
    Exhausted,
}

impl ResolutionPhase {
    /// Returns a stable label for log events.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::CacheFallback => "cache_fallback",
            Self::Exhausted => "exhausted",
        }
    }
}

/// Everything needed to explain why a resolution ended the way it did.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionReport {
    /// Unique resolution identifier.
    pub id: Uuid,
    /// When resolution started.
    pub started_at: DateTime<Utc>,
    /// Fingerprint of the qualifiers in force.
    pub policy_fingerprint: String,
    /// Result of the live phase.
    pub live: LivePhaseOutcome,
    /// Trust cache bookkeeping after the live phase.
    pub cache_update: CacheUpdate,
    /// Phase that ended the resolution.
    pub phase: ResolutionPhase,
    /// The resolved endpoint, if any.
    pub endpoint: Option<ResolvedEndpoint>,
}

impl ResolutionReport {
    /// Returns whether an endpoint was resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.endpoint.is_some()
    }
}
