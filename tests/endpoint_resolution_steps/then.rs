//! Then steps for endpoint resolution BDD scenarios.

use super::world::{ResolutionWorld, run_async};
use chrono::TimeDelta;
use mcp_trust_resolver::{
    resolution::domain::{ResolutionPhase, ResolutionSource},
    trust_cache::domain::CacheEntry,
};
use mockable::Clock;
use rstest_bdd_macros::then;

#[then(r#"the resolved endpoint is "{url}""#)]
fn resolved_endpoint_is(world: &ResolutionWorld, url: String) -> Result<(), eyre::Report> {
    let resolved = world
        .report()?
        .endpoint
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected endpoint {url}, none resolved"))?;
    if resolved.url() != url {
        return Err(eyre::eyre!("expected endpoint {url}, got {}", resolved.url()));
    }
    Ok(())
}

#[then("the endpoint came from live discovery")]
fn came_from_live(world: &ResolutionWorld) -> Result<(), eyre::Report> {
    expect_source(world, ResolutionSource::LiveDiscovery)
}

#[then("the endpoint came from the trust cache")]
fn came_from_cache(world: &ResolutionWorld) -> Result<(), eyre::Report> {
    expect_source(world, ResolutionSource::TrustCache)
}

fn expect_source(world: &ResolutionWorld, expected: ResolutionSource) -> Result<(), eyre::Report> {
    let source = world
        .report()?
        .endpoint
        .as_ref()
        .map(|resolved| resolved.source())
        .ok_or_else(|| eyre::eyre!("no endpoint resolved"))?;
    if source != expected {
        return Err(eyre::eyre!("expected source {expected}, got {source}"));
    }
    Ok(())
}

#[then("no endpoint is resolved")]
fn nothing_resolved(world: &ResolutionWorld) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if report.phase != ResolutionPhase::Exhausted || report.endpoint.is_some() {
        return Err(eyre::eyre!(
            "expected exhausted resolution, got phase {}",
            report.phase.as_str()
        ));
    }
    Ok(())
}

#[then("the trust cache holds {count:usize} entries")]
fn cache_holds(world: &ResolutionWorld, count: usize) -> Result<(), eyre::Report> {
    let ledger = run_async(world.trust_cache().load());
    if ledger.len() != count {
        return Err(eyre::eyre!(
            "expected {count} cache entries, found {}",
            ledger.len()
        ));
    }
    Ok(())
}

#[then(r#"the cache entry for "{id}" is {hours:i64} hours old"#)]
fn cache_entry_age(world: &ResolutionWorld, id: String, hours: i64) -> Result<(), eyre::Report> {
    let ledger = run_async(world.trust_cache().load());
    let recorded = ledger
        .get(&id)
        .map(CacheEntry::last_cached)
        .ok_or_else(|| eyre::eyre!("no cache entry for {id}"))?;
    let age = world.clock.utc().signed_duration_since(recorded);
    if age != TimeDelta::hours(hours) {
        return Err(eyre::eyre!("expected entry {id} to be {hours}h old, it is {age}"));
    }
    Ok(())
}
