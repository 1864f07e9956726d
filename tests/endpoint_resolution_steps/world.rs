//! Shared world state for endpoint resolution BDD scenarios.

use crate::test_helpers::FixedClock;
use mcp_trust_resolver::{
    discovery::adapters::InMemoryRegistryTransport,
    resolution::domain::ResolutionReport,
    trust_cache::{adapters::InMemoryTrustCacheStore, services::TrustCache},
};
use rstest::fixture;
use serde_json::Value;
use std::sync::Arc;

/// Registry address used by scenario policies.
pub const REGISTRY: &str = "https://registry.example/discovery";

/// Scenario world for endpoint resolution behaviour tests.
pub struct ResolutionWorld {
    /// Policy document as it would appear on disk.
    pub policy: Option<Value>,
    /// Items the registry will list.
    pub registry_items: Vec<Value>,
    /// Registry transport.
    pub transport: Arc<InMemoryRegistryTransport>,
    /// Trust cache store.
    pub store: Arc<InMemoryTrustCacheStore>,
    /// Scenario clock.
    pub clock: Arc<FixedClock>,
    /// Report of the last resolution.
    pub report: Option<ResolutionReport>,
}

impl ResolutionWorld {
    /// Creates a world with an unconfigured registry and an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: None,
            registry_items: Vec::new(),
            transport: Arc::new(InMemoryRegistryTransport::new()),
            store: Arc::new(InMemoryTrustCacheStore::new()),
            clock: Arc::new(FixedClock::default()),
            report: None,
        }
    }

    /// Returns a trust cache over the scenario store and clock.
    pub fn trust_cache(&self) -> TrustCache<InMemoryTrustCacheStore, FixedClock> {
        TrustCache::new(Arc::clone(&self.store), Arc::clone(&self.clock))
    }

    /// Returns the scenario policy.
    pub fn policy(&self) -> Result<&Value, eyre::Report> {
        self.policy
            .as_ref()
            .ok_or_else(|| eyre::eyre!("scenario policy should be defined"))
    }

    /// Returns the last resolution report.
    pub fn report(&self) -> Result<&ResolutionReport, eyre::Report> {
        self.report
            .as_ref()
            .ok_or_else(|| eyre::eyre!("endpoint should have been resolved"))
    }
}

impl Default for ResolutionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ResolutionWorld {
    ResolutionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
