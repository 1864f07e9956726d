//! When steps for endpoint resolution BDD scenarios.

use super::world::{ResolutionWorld, run_async};
use crate::test_helpers::policy_store;
use eyre::WrapErr;
use mcp_trust_resolver::resolution::services::ResolutionOrchestrator;
use rstest_bdd_macros::when;
use std::sync::Arc;

#[when("the endpoint is resolved")]
fn resolve_endpoint(world: &mut ResolutionWorld) -> Result<(), eyre::Report> {
    let policy = policy_store(world.policy()?).wrap_err("scenario policy should load")?;
    let orchestrator = ResolutionOrchestrator::new(
        &policy,
        Arc::clone(&world.transport),
        Arc::clone(&world.store),
        Arc::clone(&world.clock),
    );
    world.report = Some(run_async(orchestrator.resolve_with_report()));
    Ok(())
}
