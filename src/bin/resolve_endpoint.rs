//! Resolves a trusted MCP endpoint and prints it.
//!
//! Usage:
//!
//! ```text
//! resolve_endpoint [--policy <path>] [--cache <path>] [--timeout-ms <ms>]
//!                  [--cache-enabled <bool>] [--show-policy] [--sse] [--verbose]
//! ```
//!
//! Settings are read from `TRUST_POLICY_PATH`, `TRUST_CACHE_PATH`,
//! `TRUST_REGISTRY_TIMEOUT_MS` and `TRUST_CACHE_ENABLED`; command-line flags
//! take precedence. The process exits with status 0 when an endpoint was
//! resolved, 2 when none is available and 1 on configuration errors. A
//! resolved URL that is not HTTP(S) counts as no endpoint.

use camino::Utf8PathBuf;
use clap::Parser;
use mcp_trust_resolver::{
    config::{ResolverSettings, SettingsError},
    discovery::{
        adapters::{HttpRegistryTransport, HttpRegistryTransportConfig},
        domain::DiscoveryError,
    },
    policy::{
        adapters::FilePolicySource,
        domain::PolicyError,
        services::{PolicyStore, render_policy_directory},
    },
    resolution::{
        domain::{EndpointError, SseEndpoint},
        services::{ResolutionOptions, ResolutionOrchestrator},
    },
    trust_cache::adapters::FileTrustCacheStore,
};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Builder;

const EXIT_CONFIGURATION: u8 = 1;
const EXIT_EXHAUSTED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "resolve_endpoint", version, about = "Resolve a trusted MCP endpoint")]
struct Cli {
    /// Policy document path.
    #[arg(long)]
    policy: Option<Utf8PathBuf>,
    /// Trust cache file path.
    #[arg(long)]
    cache: Option<Utf8PathBuf>,
    /// Registry request timeout in milliseconds.
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout_ms: Option<u64>,
    /// Overrides the policy's cache flag.
    #[arg(long, value_name = "BOOL")]
    cache_enabled: Option<bool>,
    /// Prints the policy directory before resolving.
    #[arg(long)]
    show_policy: bool,
    /// Prints the SSE address instead of the endpoint URL.
    #[arg(long)]
    sse: bool,
    /// Enables debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, mut settings: ResolverSettings) -> ResolverSettings {
        if let Some(policy) = &self.policy {
            settings.policy_path.clone_from(policy);
        }
        if let Some(cache) = &self.cache {
            settings.cache_path.clone_from(cache);
        }
        if let Some(millis) = self.timeout_ms {
            settings.registry_timeout = Duration::from_millis(millis);
        }
        if self.cache_enabled.is_some() {
            settings.cache_enabled_override = self.cache_enabled;
        }
        settings
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Transport(#[from] DiscoveryError),
    #[error("runtime init failed: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("mcp_trust_resolver=debug,warn")
        } else {
            EnvFilter::new("mcp_trust_resolver=info,warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "resolver failed");
            ExitCode::from(EXIT_CONFIGURATION)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    let settings = cli.apply(ResolverSettings::from_env()?);
    let policy = PolicyStore::load(&FilePolicySource::new(settings.policy_path.clone()))?;

    let mut stdout = io::stdout().lock();
    if cli.show_policy {
        let directory = render_policy_directory(policy.document())?;
        writeln!(stdout, "{directory}").map_err(CliError::Output)?;
    }

    let transport = HttpRegistryTransport::new(&HttpRegistryTransportConfig {
        timeout: settings.registry_timeout,
        ..HttpRegistryTransportConfig::default()
    })?;
    let options = ResolutionOptions {
        cache_enabled: settings.cache_enabled(policy.document().cache_enabled()),
    };
    let orchestrator = ResolutionOrchestrator::new(
        &policy,
        Arc::new(transport),
        Arc::new(FileTrustCacheStore::new(settings.cache_path.clone())),
        Arc::new(DefaultClock),
    )
    .with_options(options);

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let report = runtime.block_on(orchestrator.resolve_with_report());

    let Some(endpoint) = report.endpoint else {
        return Ok(ExitCode::from(EXIT_EXHAUSTED));
    };
    match endpoint_line(endpoint.url(), cli.sse) {
        Ok(line) => {
            writeln!(stdout, "{line}").map_err(CliError::Output)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::warn!(
                item_id = endpoint.item_id(),
                error = %err,
                "resolved endpoint is not usable"
            );
            Ok(ExitCode::from(EXIT_EXHAUSTED))
        }
    }
}

/// Returns the line to print for a resolved URL.
fn endpoint_line(url: &str, sse: bool) -> Result<String, EndpointError> {
    let sse_endpoint = SseEndpoint::from_resolved(url)?;
    if sse {
        Ok(sse_endpoint.to_string())
    } else {
        Ok(url.trim().to_owned())
    }
}
