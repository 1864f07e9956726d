//! Qualifier declarations and their validated form.

use super::{PolicyError, PolicyResult};
use crate::discovery::domain::VerifiedFlag;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the exact-match verification qualifier.
pub const VERIFIED: &str = "verified";
/// Name of the provider allow-list qualifier.
pub const PROVIDER: &str = "provider";
/// Name of the minimum relevance score qualifier.
pub const RELEVANCE_SCORE: &str = "relevance_score";
/// Name of the minimum uptime qualifier.
pub const UPTIME: &str = "uptime";

/// A qualifier as declared in the policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    /// Qualifier name.
    pub name: String,
    /// Threshold or match value.
    pub value: Value,
    /// Human-readable rationale. Not used for matching.
    #[serde(default)]
    pub need: String,
}

impl Qualifier {
    /// Creates a qualifier declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>, need: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            need: need.into(),
        }
    }
}

/// Providers a trusted endpoint may come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProviderAllowList {
    /// Explicit provider names; membership is exact.
    Listed(Vec<String>),
    /// A single string; a provider is permitted when the string contains it.
    Text(String),
}

impl ProviderAllowList {
    /// Returns whether `provider` is permitted.
    #[must_use]
    pub fn permits(&self, provider: &str) -> bool {
        match self {
            Self::Listed(providers) => providers.iter().any(|allowed| allowed == provider),
            Self::Text(allowed) => allowed.contains(provider),
        }
    }
}

/// The four mandatory qualifiers in validated form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustQualifiers {
    verified: VerifiedFlag,
    providers: ProviderAllowList,
    min_relevance_score: f64,
    min_uptime: f64,
}

impl TrustQualifiers {
    /// Creates a validated qualifier set from explicit values.
    #[must_use]
    pub const fn new(
        verified: VerifiedFlag,
        providers: ProviderAllowList,
        min_relevance_score: f64,
        min_uptime: f64,
    ) -> Self {
        Self {
            verified,
            providers,
            min_relevance_score,
            min_uptime,
        }
    }

    /// Validates declared qualifiers.
    ///
    /// Unknown qualifier names are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::MissingQualifier`],
    /// [`PolicyError::DuplicateQualifier`] or
    /// [`PolicyError::InvalidQualifierValue`] when one of the four required
    /// qualifiers is absent, repeated or ill-typed.
    pub fn from_qualifiers(qualifiers: &[Qualifier]) -> PolicyResult<Self> {
        let verified = parse_verified(required(qualifiers, VERIFIED)?)?;
        let providers = parse_providers(required(qualifiers, PROVIDER)?)?;
        let min_relevance_score =
            parse_threshold(RELEVANCE_SCORE, required(qualifiers, RELEVANCE_SCORE)?)?;
        let min_uptime = parse_threshold(UPTIME, required(qualifiers, UPTIME)?)?;
        Ok(Self::new(verified, providers, min_relevance_score, min_uptime))
    }

    /// Returns the required verification marker.
    #[must_use]
    pub const fn verified(&self) -> &VerifiedFlag {
        &self.verified
    }

    /// Returns the provider allow-list.
    #[must_use]
    pub const fn providers(&self) -> &ProviderAllowList {
        &self.providers
    }

    /// Returns the minimum relevance score.
    #[must_use]
    pub const fn min_relevance_score(&self) -> f64 {
        self.min_relevance_score
    }

    /// Returns the minimum uptime.
    #[must_use]
    pub const fn min_uptime(&self) -> f64 {
        self.min_uptime
    }
}

fn required<'a>(qualifiers: &'a [Qualifier], name: &'static str) -> PolicyResult<&'a Value> {
    let mut matching = qualifiers.iter().filter(|qualifier| qualifier.name == name);
    let first = matching.next().ok_or(PolicyError::MissingQualifier(name))?;
    if matching.next().is_some() {
        return Err(PolicyError::DuplicateQualifier(name));
    }
    Ok(&first.value)
}

fn parse_verified(value: &Value) -> PolicyResult<VerifiedFlag> {
    match value {
        Value::Bool(flag) => Ok(VerifiedFlag::Flag(*flag)),
        Value::String(text) => Ok(VerifiedFlag::Text(text.clone())),
        other => Err(PolicyError::InvalidQualifierValue {
            name: VERIFIED,
            reason: format!("expected a boolean or string, found {other}"),
        }),
    }
}

fn parse_providers(value: &Value) -> PolicyResult<ProviderAllowList> {
    match value {
        Value::String(text) => Ok(ProviderAllowList::Text(text.clone())),
        Value::Array(entries) => entries
            .iter()
            .map(|entry| {
                entry
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| PolicyError::InvalidQualifierValue {
                        name: PROVIDER,
                        reason: format!("expected provider names, found {entry}"),
                    })
            })
            .collect::<PolicyResult<Vec<_>>>()
            .map(ProviderAllowList::Listed),
        other => Err(PolicyError::InvalidQualifierValue {
            name: PROVIDER,
            reason: format!("expected a list or string of providers, found {other}"),
        }),
    }
}

fn parse_threshold(name: &'static str, value: &Value) -> PolicyResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| PolicyError::InvalidQualifierValue {
            name,
            reason: format!("expected a number, found {value}"),
        })
}
