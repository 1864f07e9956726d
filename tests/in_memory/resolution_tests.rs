//! Resolution protocol over in-memory adapters.

use super::helpers::{Harness, REGISTRY, harness};
use crate::test_helpers::{FixedClock, policy_json, policy_store, registry_body, registry_item};
use async_trait::async_trait;
use chrono::TimeDelta;
use mcp_trust_resolver::{
    discovery::{
        adapters::InMemoryRegistryTransport,
        domain::{DiscoveryError, DiscoveryResult},
        ports::RegistryTransport,
    },
    resolution::{
        domain::{CacheUpdate, LivePhaseOutcome, ResolutionPhase, ResolutionSource},
        services::{ResolutionOptions, ResolutionOrchestrator},
    },
    trust_cache::{adapters::InMemoryTrustCacheStore, domain::UpsertOutcome},
};
use mockall::mock;
use reqwest::Url;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

mock! {
    Transport {}

    #[async_trait]
    impl RegistryTransport for Transport {
        async fn fetch(&self, url: &Url) -> DiscoveryResult<String>;
    }
}

fn preferred_and_rival() -> String {
    registry_body(&[
        registry_item("a", "acme", 0.9, 0.99),
        registry_item("b", "other", 0.99, 0.99),
    ])
}

async fn seed_cache_with_a(harness: &Harness) {
    harness
        .transport
        .respond_with(Ok(registry_body(&[registry_item("a", "acme", 0.9, 0.99)])));
    let seeded = harness.orchestrator.resolve().await;
    assert_eq!(seeded.as_deref(), Some("https://a.example/mcp"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn live_match_picks_first_qualifying_item(harness: Harness) {
    harness.transport.respond_with(Ok(preferred_and_rival()));

    let report = harness.orchestrator.resolve_with_report().await;

    assert_eq!(report.phase, ResolutionPhase::Live);
    let endpoint = report.endpoint.expect("endpoint should resolve");
    assert_eq!(endpoint.url(), "https://a.example/mcp");
    assert_eq!(endpoint.source(), ResolutionSource::LiveDiscovery);
    assert_eq!(endpoint.item_name(), "Server a");
    assert_eq!(
        report.live,
        LivePhaseOutcome::Matched {
            item_id: "a".to_owned()
        }
    );
    assert_eq!(report.cache_update, CacheUpdate::Recorded(UpsertOutcome::Inserted));
    assert_eq!(harness.store.write_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn discovery_request_carries_policy_criteria(harness: Harness) {
    harness.transport.respond_with(Ok(preferred_and_rival()));

    harness.orchestrator.resolve().await;

    let requested: Vec<String> = harness
        .transport
        .requested_urls()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        requested,
        vec![format!(
            "{REGISTRY}?limit=3&q=recipe&tags=nutrition&type=tool&verified=true"
        )]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn live_match_is_not_cached_when_disabled() {
    let harness = Harness::for_policy(&policy_json(REGISTRY, false));
    harness.transport.respond_with(Ok(preferred_and_rival()));

    let report = harness.orchestrator.resolve_with_report().await;

    assert!(report.is_resolved());
    assert_eq!(report.cache_update, CacheUpdate::Disabled);
    assert_eq!(harness.store.write_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn options_override_policy_cache_flag(harness: Harness) {
    harness.transport.respond_with(Ok(preferred_and_rival()));
    let orchestrator = ResolutionOrchestrator::new(
        &policy_store(&policy_json(REGISTRY, true)).expect("test policy should load"),
        Arc::clone(&harness.transport),
        Arc::clone(&harness.store),
        Arc::clone(&harness.clock),
    )
    .with_options(ResolutionOptions {
        cache_enabled: false,
    });

    orchestrator.resolve().await;

    assert_eq!(harness.store.write_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_registry_falls_back_to_cached_entry(harness: Harness) {
    seed_cache_with_a(&harness).await;
    harness
        .transport
        .respond_with(Err(DiscoveryError::Transport("connection refused".to_owned())));

    let report = harness.orchestrator.resolve_with_report().await;

    assert_eq!(report.phase, ResolutionPhase::CacheFallback);
    assert!(matches!(report.live, LivePhaseOutcome::Failed(DiscoveryError::Transport(_))));
    let endpoint = report.endpoint.expect("cached endpoint should resolve");
    assert_eq!(endpoint.url(), "https://a.example/mcp");
    assert_eq!(endpoint.source(), ResolutionSource::TrustCache);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn no_live_match_falls_back_to_cached_entry(harness: Harness) {
    seed_cache_with_a(&harness).await;
    harness
        .transport
        .respond_with(Ok(registry_body(&[registry_item("b", "other", 0.99, 0.99)])));

    let report = harness.orchestrator.resolve_with_report().await;

    assert_eq!(report.live, LivePhaseOutcome::NoQualifyingItem { candidates: 1 });
    assert_eq!(report.cache_update, CacheUpdate::NotAttempted);
    assert_eq!(
        report.endpoint.map(|endpoint| endpoint.into_url()),
        Some("https://a.example/mcp".to_owned())
    );
}

#[rstest]
#[case::empty_object("{}")]
#[case::not_json("Error fetching the URL: timed out")]
#[case::scalar_data(r#"{"data": "none"}"#)]
#[tokio::test(flavor = "multi_thread")]
async fn unusable_registry_response_degrades_to_cache(#[case] body: &str) {
    let harness = Harness::for_policy(&policy_json(REGISTRY, true));
    seed_cache_with_a(&harness).await;
    harness.transport.respond_with(Ok(body.to_owned()));

    let resolved = harness.orchestrator.resolve().await;

    assert_eq!(resolved.as_deref(), Some("https://a.example/mcp"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn http_error_status_degrades_to_cache(harness: Harness) {
    seed_cache_with_a(&harness).await;
    harness.transport.respond_with(Err(DiscoveryError::HttpStatus(503)));

    let report = harness.orchestrator.resolve_with_report().await;

    assert_eq!(report.live, LivePhaseOutcome::Failed(DiscoveryError::HttpStatus(503)));
    assert_eq!(report.phase, ResolutionPhase::CacheFallback);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_cache_and_failed_registry_is_exhausted(harness: Harness) {
    harness
        .transport
        .respond_with(Err(DiscoveryError::Transport("connection refused".to_owned())));

    let report = harness.orchestrator.resolve_with_report().await;

    assert_eq!(report.phase, ResolutionPhase::Exhausted);
    assert!(report.endpoint.is_none());
    assert!(harness.orchestrator.resolve().await.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tightened_policy_rejects_previously_cached_entry(harness: Harness) {
    seed_cache_with_a(&harness).await;
    let mut strict = policy_json(REGISTRY, true);
    if let Some(uptime) = strict.pointer_mut("/qualifiers_metrics/3/value") {
        *uptime = json!(0.999);
    }
    let tightened = harness.with_policy(&strict);
    tightened
        .transport
        .respond_with(Err(DiscoveryError::Transport("connection refused".to_owned())));

    let report = tightened.orchestrator.resolve_with_report().await;

    assert_eq!(report.phase, ResolutionPhase::Exhausted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_criteria_flag_does_not_gate_fallback() {
    let cached = json!({"cached_mcp": [{
        "mcp_endpoint": "https://a.example/mcp",
        "met_protocol_criteria": false,
        "last_cached": "01.05.2025 08:00:00",
        "criteria": {},
        "data_item": registry_item("a", "acme", 0.9, 0.99)
    }]});
    let transport = Arc::new(InMemoryRegistryTransport::new());
    transport.respond_with(Err(DiscoveryError::Transport("connection refused".to_owned())));
    let orchestrator = ResolutionOrchestrator::new(
        &policy_store(&policy_json(REGISTRY, true)).expect("test policy should load"),
        transport,
        Arc::new(InMemoryTrustCacheStore::with_contents(cached.to_string())),
        Arc::new(FixedClock::default()),
    );

    let report = orchestrator.resolve_with_report().await;

    assert_eq!(report.phase, ResolutionPhase::CacheFallback);
    assert_eq!(
        report.endpoint.map(|endpoint| endpoint.into_url()),
        Some("https://a.example/mcp".to_owned())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_cached_entry_still_serves_as_fallback(harness: Harness) {
    seed_cache_with_a(&harness).await;
    harness.clock.advance(TimeDelta::days(30));
    harness
        .transport
        .respond_with(Err(DiscoveryError::Transport("connection refused".to_owned())));

    let resolved = harness.orchestrator.resolve().await;

    assert_eq!(resolved.as_deref(), Some("https://a.example/mcp"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cache_write_failure_does_not_abort_resolution(harness: Harness) {
    harness.transport.respond_with(Ok(preferred_and_rival()));
    harness.store.reject_writes(true);

    let report = harness.orchestrator.resolve_with_report().await;

    assert!(matches!(report.cache_update, CacheUpdate::Failed(_)));
    assert_eq!(
        report.endpoint.map(|endpoint| endpoint.into_url()),
        Some("https://a.example/mcp".to_owned())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn report_records_policy_fingerprint_and_start(harness: Harness) {
    harness.transport.respond_with(Ok(preferred_and_rival()));
    let policy = policy_store(&policy_json(REGISTRY, true)).expect("test policy should load");

    let first = harness.orchestrator.resolve_with_report().await;
    let second = harness.orchestrator.resolve_with_report().await;

    assert_eq!(first.policy_fingerprint, policy.document().fingerprint());
    assert_eq!(first.started_at, crate::test_helpers::epoch());
    assert_ne!(first.id, second.id);
    assert_eq!(second.cache_update, CacheUpdate::Recorded(UpsertOutcome::Fresh));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_discovery_is_attempted_exactly_once() {
    let mut transport = MockTransport::new();
    transport
        .expect_fetch()
        .times(1)
        .returning(|_| Err(DiscoveryError::Transport("connection refused".to_owned())));
    let orchestrator = ResolutionOrchestrator::new(
        &policy_store(&policy_json(REGISTRY, true)).expect("test policy should load"),
        Arc::new(transport),
        Arc::new(InMemoryTrustCacheStore::new()),
        Arc::new(FixedClock::default()),
    );

    assert!(orchestrator.resolve().await.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unconfigured_transport_behaves_like_unreachable_registry() {
    let orchestrator = ResolutionOrchestrator::new(
        &policy_store(&policy_json(REGISTRY, true)).expect("test policy should load"),
        Arc::new(InMemoryRegistryTransport::new()),
        Arc::new(InMemoryTrustCacheStore::new()),
        Arc::new(FixedClock::default()),
    );

    let report = orchestrator.resolve_with_report().await;

    assert!(matches!(report.live, LivePhaseOutcome::Failed(DiscoveryError::Transport(_))));
}
