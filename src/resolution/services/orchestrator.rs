//! Live-then-cache resolution of a trusted endpoint.

use crate::discovery::{
    domain::{DiscoveryError, RegistryItem},
    ports::RegistryTransport,
    services::RegistryClient,
};
use crate::policy::{
    domain::{PolicyDocument, first_failing_qualifier, first_match},
    services::PolicyStore,
};
use crate::resolution::domain::{
    CacheUpdate, LivePhaseOutcome, ResolutionPhase, ResolutionReport, ResolvedEndpoint,
};
use crate::trust_cache::{ports::TrustCacheStore, services::TrustCache};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Per-resolution switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionOptions {
    /// Whether a live match is recorded in the trust cache.
    pub cache_enabled: bool,
}

impl ResolutionOptions {
    /// Takes the switches from the policy document.
    #[must_use]
    pub const fn from_policy(policy: &PolicyDocument) -> Self {
        Self {
            cache_enabled: policy.cache_enabled(),
        }
    }
}

/// Composes discovery, matching and the trust cache into one resolution.
#[derive(Clone)]
pub struct ResolutionOrchestrator<T, S, C>
where
    T: RegistryTransport,
    S: TrustCacheStore,
    C: Clock + Send + Sync,
{
    policy: Arc<PolicyDocument>,
    client: RegistryClient<T>,
    cache: TrustCache<S, C>,
    clock: Arc<C>,
    options: ResolutionOptions,
}

struct LivePhase {
    outcome: LivePhaseOutcome,
    cache_update: CacheUpdate,
    endpoint: Option<ResolvedEndpoint>,
}

impl<T, S, C> ResolutionOrchestrator<T, S, C>
where
    T: RegistryTransport,
    S: TrustCacheStore,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator for the loaded policy.
    #[must_use]
    pub fn new(policy: &PolicyStore, transport: Arc<T>, store: Arc<S>, clock: Arc<C>) -> Self {
        let document = policy.shared();
        let client = RegistryClient::new(transport, document.registry_discovery_endpoint().clone());
        let options = ResolutionOptions::from_policy(&document);
        Self {
            policy: document,
            client,
            cache: TrustCache::new(store, Arc::clone(&clock)),
            clock,
            options,
        }
    }

    /// Replaces the switches taken from the policy.
    #[must_use]
    pub fn with_options(mut self, options: ResolutionOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the switches in force.
    #[must_use]
    pub const fn options(&self) -> ResolutionOptions {
        self.options
    }

    /// Returns the trust cache used for recording and fallback.
    #[must_use]
    pub const fn trust_cache(&self) -> &TrustCache<S, C> {
        &self.cache
    }

    /// Resolves a trusted endpoint URL, or `None` when neither live
    /// discovery nor the trust cache yields one.
    pub async fn resolve(&self) -> Option<String> {
        self.resolve_with_report()
            .await
            .endpoint
            .map(ResolvedEndpoint::into_url)
    }

    /// Resolves a trusted endpoint and returns the full decision record.
    pub async fn resolve_with_report(&self) -> ResolutionReport {
        let id = Uuid::new_v4();
        let started_at = self.clock.utc();
        let policy_fingerprint = self.policy.fingerprint().to_owned();
        info!(resolution_id = %id, fingerprint = %policy_fingerprint, "resolution started");

        let live = self.live_phase().await;
        let (phase, endpoint) = match live.endpoint {
            Some(endpoint) => (ResolutionPhase::Live, Some(endpoint)),
            None => match self.cache_phase().await {
                Some(endpoint) => (ResolutionPhase::CacheFallback, Some(endpoint)),
                None => (ResolutionPhase::Exhausted, None),
            },
        };

        match &endpoint {
            Some(resolved) => info!(
                resolution_id = %id,
                phase = phase.as_str(),
                source = %resolved.source(),
                item_id = resolved.item_id(),
                name = resolved.item_name(),
                url = resolved.url(),
                relevance_score = resolved.relevance_score(),
                uptime = resolved.uptime(),
                "trusted endpoint resolved"
            ),
            None => warn!(
                resolution_id = %id,
                phase = phase.as_str(),
                "no trusted endpoint available"
            ),
        }

        ResolutionReport {
            id,
            started_at,
            policy_fingerprint,
            live: live.outcome,
            cache_update: live.cache_update,
            phase,
            endpoint,
        }
    }

    async fn live_phase(&self) -> LivePhase {
        let criteria = self.policy.discovery_criteria();
        let items = match self.client.discover(criteria).await {
            Ok(items) => items,
            Err(err) => return self.live_failure(err),
        };

        let Some(item) = first_match(&items, self.policy.trust_qualifiers()) else {
            self.log_rejections(&items);
            info!(
                phase = "live",
                outcome = "no_match",
                candidates = items.len(),
                "no registry candidate satisfies the policy"
            );
            return LivePhase {
                outcome: LivePhaseOutcome::NoQualifyingItem {
                    candidates: items.len(),
                },
                cache_update: CacheUpdate::NotAttempted,
                endpoint: None,
            };
        };

        info!(phase = "live", outcome = "matched", item_id = item.id(), "registry candidate accepted");
        let cache_update = if self.options.cache_enabled {
            match self.cache.record_verified(item, criteria).await {
                Ok(outcome) => CacheUpdate::Recorded(outcome),
                Err(err) => {
                    warn!(
                        phase = "live",
                        item_id = item.id(),
                        error_kind = err.kind(),
                        error = %err,
                        "failed to record verified endpoint"
                    );
                    CacheUpdate::Failed(err.to_string())
                }
            }
        } else {
            CacheUpdate::Disabled
        };

        LivePhase {
            outcome: LivePhaseOutcome::Matched {
                item_id: item.id().to_owned(),
            },
            cache_update,
            endpoint: Some(ResolvedEndpoint::from_live(item)),
        }
    }

    fn live_failure(&self, err: DiscoveryError) -> LivePhase {
        warn!(
            phase = "live",
            outcome = "failed",
            registry = %self.client.endpoint(),
            error_kind = err.kind(),
            error = %err,
            "live discovery failed, falling back to trust cache"
        );
        LivePhase {
            outcome: LivePhaseOutcome::Failed(err),
            cache_update: CacheUpdate::NotAttempted,
            endpoint: None,
        }
    }

    fn log_rejections(&self, items: &[RegistryItem]) {
        for item in items {
            if let Some(qualifier) = first_failing_qualifier(item, self.policy.trust_qualifiers()) {
                debug!(
                    phase = "live",
                    item_id = item.id(),
                    qualifier = %qualifier,
                    "registry candidate rejected"
                );
            }
        }
    }

    async fn cache_phase(&self) -> Option<ResolvedEndpoint> {
        let ledger = self.cache.load().await;
        let found = self
            .cache
            .first_passing_cached_endpoint(&ledger, self.policy.trust_qualifiers())
            .map(ResolvedEndpoint::from_cache);
        match &found {
            Some(resolved) => info!(
                phase = "cache_fallback",
                outcome = "matched",
                item_id = resolved.item_id(),
                "cached endpoint still satisfies the policy"
            ),
            None => info!(
                phase = "cache_fallback",
                outcome = "no_match",
                entries = ledger.len(),
                "no cached endpoint satisfies the policy"
            ),
        }
        found
    }
}
