//! Runtime settings for the resolver.
//!
//! Settings come from environment variables. Parsing goes through an
//! injectable lookup so tests never touch the process environment.

use camino::Utf8PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the policy document path.
pub const POLICY_PATH_VAR: &str = "TRUST_POLICY_PATH";
/// Environment variable holding the trust cache file path.
pub const CACHE_PATH_VAR: &str = "TRUST_CACHE_PATH";
/// Environment variable holding the registry timeout in milliseconds.
pub const REGISTRY_TIMEOUT_VAR: &str = "TRUST_REGISTRY_TIMEOUT_MS";
/// Environment variable overriding the policy's cache flag.
pub const CACHE_ENABLED_VAR: &str = "TRUST_CACHE_ENABLED";

/// Default policy document path.
pub const DEFAULT_POLICY_PATH: &str = "policy.json";
/// Default trust cache file path.
pub const DEFAULT_CACHE_PATH: &str = "cached_mcp_servers.json";
/// Default registry timeout in milliseconds.
pub const DEFAULT_REGISTRY_TIMEOUT_MS: u64 = 10_000;

/// Errors returned while reading settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// The timeout is not a positive whole number of milliseconds.
    #[error("{variable} must be a positive number of milliseconds, got '{value}'")]
    InvalidTimeout {
        /// Variable name.
        variable: &'static str,
        /// Rejected value.
        value: String,
    },

    /// A boolean switch has an unrecognised value.
    #[error("{variable} must be one of true/false/1/0/yes/no, got '{value}'")]
    InvalidFlag {
        /// Variable name.
        variable: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Policy document path.
    pub policy_path: Utf8PathBuf,
    /// Trust cache file path.
    pub cache_path: Utf8PathBuf,
    /// Upper bound on a single registry request.
    pub registry_timeout: Duration,
    /// Replaces the policy's cache flag when set.
    pub cache_enabled_override: Option<bool>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            policy_path: Utf8PathBuf::from(DEFAULT_POLICY_PATH),
            cache_path: Utf8PathBuf::from(DEFAULT_CACHE_PATH),
            registry_timeout: Duration::from_millis(DEFAULT_REGISTRY_TIMEOUT_MS),
            cache_enabled_override: None,
        }
    }
}

impl ResolverSettings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let registry_timeout = match read(REGISTRY_TIMEOUT_VAR) {
            Some(value) => parse_timeout(&value)?,
            None => defaults.registry_timeout,
        };
        let cache_enabled_override = read(CACHE_ENABLED_VAR)
            .map(|value| parse_flag(CACHE_ENABLED_VAR, &value))
            .transpose()?;

        Ok(Self {
            policy_path: read(POLICY_PATH_VAR).map_or(defaults.policy_path, Utf8PathBuf::from),
            cache_path: read(CACHE_PATH_VAR).map_or(defaults.cache_path, Utf8PathBuf::from),
            registry_timeout,
            cache_enabled_override,
        })
    }

    /// Returns the effective cache flag given the policy's own setting.
    #[must_use]
    pub fn cache_enabled(&self, policy_flag: bool) -> bool {
        self.cache_enabled_override.unwrap_or(policy_flag)
    }
}

fn parse_timeout(value: &str) -> Result<Duration, SettingsError> {
    match value.parse::<u64>() {
        Ok(millis) if millis > 0 => Ok(Duration::from_millis(millis)),
        _ => Err(SettingsError::InvalidTimeout {
            variable: REGISTRY_TIMEOUT_VAR,
            value: value.to_owned(),
        }),
    }
}

fn parse_flag(variable: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(SettingsError::InvalidFlag {
            variable,
            value: value.to_owned(),
        }),
    }
}
