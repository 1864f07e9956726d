//! Given steps for endpoint resolution BDD scenarios.

use super::world::{REGISTRY, ResolutionWorld, run_async};
use crate::test_helpers::{registry_body, registry_item};
use chrono::TimeDelta;
use eyre::WrapErr;
use mcp_trust_resolver::discovery::domain::{DiscoveryCriteria, DiscoveryError, RegistryItem};
use rstest_bdd_macros::given;
use serde_json::json;

#[given(
    r#"a policy trusting verified "{provider}" servers with relevance {relevance:f64} and uptime {uptime:f64}"#
)]
fn a_policy(world: &mut ResolutionWorld, provider: String, relevance: f64, uptime: f64) {
    world.policy = Some(json!({
        "registry_discovery_end_point": REGISTRY,
        "cache_mcp_servers_policy": true,
        "qualifiers_metrics": [
            {"name": "verified", "value": true, "need": "Verified servers only"},
            {"name": "provider", "value": [provider], "need": "Trusted provider"},
            {"name": "relevance_score", "value": relevance, "need": "Relevant"},
            {"name": "uptime", "value": uptime, "need": "Reliable"}
        ]
    }));
}

#[given(
    r#"the registry lists "{id}" from "{provider}" with relevance {relevance:f64} and uptime {uptime:f64}"#
)]
fn registry_lists(
    world: &mut ResolutionWorld,
    id: String,
    provider: String,
    relevance: f64,
    uptime: f64,
) {
    world
        .registry_items
        .push(registry_item(&id, &provider, relevance, uptime));
    world
        .transport
        .respond_with(Ok(registry_body(&world.registry_items)));
}

#[given("the registry is unreachable")]
fn registry_unreachable(world: &mut ResolutionWorld) {
    world
        .transport
        .respond_with(Err(DiscoveryError::Transport("connection refused".to_owned())));
}

#[given(r#"the registry answers "{body}""#)]
fn registry_answers(world: &mut ResolutionWorld, body: String) {
    world.transport.respond_with(Ok(body));
}

#[given(
    r#"the trust cache verified "{id}" from "{provider}" with relevance {relevance:f64} and uptime {uptime:f64}"#
)]
fn cache_verified(
    world: &mut ResolutionWorld,
    id: String,
    provider: String,
    relevance: f64,
    uptime: f64,
) -> Result<(), eyre::Report> {
    let item: RegistryItem = serde_json::from_value(registry_item(&id, &provider, relevance, uptime))
        .wrap_err("scenario item should decode")?;
    run_async(
        world
            .trust_cache()
            .record_verified(&item, &DiscoveryCriteria::recipe_tools()),
    )
    .wrap_err("seeding the trust cache should succeed")?;
    Ok(())
}

#[given("the policy minimum uptime is raised to {uptime:f64}")]
fn raise_uptime(world: &mut ResolutionWorld, uptime: f64) -> Result<(), eyre::Report> {
    let threshold = world
        .policy
        .as_mut()
        .and_then(|policy| policy.pointer_mut("/qualifiers_metrics/3/value"))
        .ok_or_else(|| eyre::eyre!("scenario policy should declare an uptime threshold"))?;
    *threshold = json!(uptime);
    Ok(())
}

#[given("{hours:i64} hours pass")]
fn hours_pass(world: &mut ResolutionWorld, hours: i64) {
    world.clock.advance(TimeDelta::hours(hours));
}
