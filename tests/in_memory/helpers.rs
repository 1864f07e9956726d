//! Shared fixtures for in-memory integration tests.

use crate::test_helpers::{FixedClock, policy_json, policy_store};
use mcp_trust_resolver::{
    discovery::adapters::InMemoryRegistryTransport,
    resolution::services::ResolutionOrchestrator,
    trust_cache::adapters::InMemoryTrustCacheStore,
};
use rstest::fixture;
use serde_json::Value;
use std::sync::Arc;

/// Registry address used by in-memory policies.
pub const REGISTRY: &str = "https://registry.example/discovery";

/// Orchestrator type wired to in-memory adapters.
pub type TestOrchestrator =
    ResolutionOrchestrator<InMemoryRegistryTransport, InMemoryTrustCacheStore, FixedClock>;

/// Adapters and orchestrator for one test.
pub struct Harness {
    /// Registry transport.
    pub transport: Arc<InMemoryRegistryTransport>,
    /// Trust cache store.
    pub store: Arc<InMemoryTrustCacheStore>,
    /// Clock shared by the cache and the orchestrator.
    pub clock: Arc<FixedClock>,
    /// Orchestrator under test.
    pub orchestrator: TestOrchestrator,
}

impl Harness {
    /// Wires in-memory adapters to an orchestrator for `policy`.
    pub fn for_policy(policy: &Value) -> Self {
        let transport = Arc::new(InMemoryRegistryTransport::new());
        let store = Arc::new(InMemoryTrustCacheStore::new());
        let clock = Arc::new(FixedClock::default());
        let orchestrator = ResolutionOrchestrator::new(
            &policy_store(policy).expect("test policy should load"),
            Arc::clone(&transport),
            Arc::clone(&store),
            Arc::clone(&clock),
        );
        Self {
            transport,
            store,
            clock,
            orchestrator,
        }
    }

    /// Rebuilds the orchestrator for `policy`, keeping the adapters.
    pub fn with_policy(self, policy: &Value) -> Self {
        let orchestrator = ResolutionOrchestrator::new(
            &policy_store(policy).expect("test policy should load"),
            Arc::clone(&self.transport),
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
        );
        Self {
            orchestrator,
            ..self
        }
    }
}

/// Harness with caching enabled.
#[fixture]
pub fn harness() -> Harness {
    Harness::for_policy(&policy_json(REGISTRY, true))
}
