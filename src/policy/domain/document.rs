//! Validated policy document.

use super::{PolicyError, PolicyResult, Qualifier, TrustQualifiers};
use crate::discovery::domain::DiscoveryCriteria;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Descriptive policy fields shown in the policy directory.
///
/// None of these influence trust decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyMetadata {
    /// Protocol cluster the policy belongs to.
    pub protocol_cluster: Option<Value>,
    /// Protocol level label.
    pub protocol_level: Option<Value>,
    /// Policy cluster label.
    pub policy_cluster: Option<Value>,
    /// Human-facing registry address.
    pub mcp_registry: Option<Value>,
    /// Free-form policy tags.
    pub policy_tags: Vec<String>,
}

/// On-disk shape of the policy document.
#[derive(Debug, Deserialize)]
struct RawPolicyDocument {
    registry_discovery_end_point: String,
    cache_mcp_servers_policy: bool,
    qualifiers_metrics: Vec<Qualifier>,
    #[serde(default)]
    discovery_criteria: Option<DiscoveryCriteria>,
    #[serde(flatten)]
    metadata: PolicyMetadata,
}

/// A loaded and validated trust policy.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDocument {
    registry_discovery_endpoint: Url,
    cache_enabled: bool,
    qualifiers: Vec<Qualifier>,
    trust_qualifiers: TrustQualifiers,
    discovery_criteria: DiscoveryCriteria,
    metadata: PolicyMetadata,
    fingerprint: String,
}

impl PolicyDocument {
    /// Parses and validates a JSON policy document.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Parse`] for malformed JSON or missing required
    /// fields, endpoint errors when the registry address is not an HTTP(S)
    /// URL, and qualifier errors from [`TrustQualifiers::from_qualifiers`].
    pub fn from_json_str(contents: &str) -> PolicyResult<Self> {
        let raw: RawPolicyDocument =
            serde_json::from_str(contents).map_err(|err| PolicyError::Parse(err.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawPolicyDocument) -> PolicyResult<Self> {
        let endpoint = raw.registry_discovery_end_point.trim();
        let registry_discovery_endpoint =
            Url::parse(endpoint).map_err(|err| PolicyError::InvalidRegistryEndpoint {
                value: endpoint.to_owned(),
                reason: err.to_string(),
            })?;
        if !matches!(registry_discovery_endpoint.scheme(), "http" | "https") {
            return Err(PolicyError::UnsupportedRegistryScheme(endpoint.to_owned()));
        }

        let trust_qualifiers = TrustQualifiers::from_qualifiers(&raw.qualifiers_metrics)?;
        let fingerprint = fingerprint(&trust_qualifiers)?;

        Ok(Self {
            registry_discovery_endpoint,
            cache_enabled: raw.cache_mcp_servers_policy,
            qualifiers: raw.qualifiers_metrics,
            trust_qualifiers,
            discovery_criteria: raw.discovery_criteria.unwrap_or_default(),
            metadata: raw.metadata,
            fingerprint,
        })
    }

    /// Returns the registry discovery endpoint.
    #[must_use]
    pub const fn registry_discovery_endpoint(&self) -> &Url {
        &self.registry_discovery_endpoint
    }

    /// Returns whether verified endpoints are written to the trust cache.
    #[must_use]
    pub const fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Returns every declared qualifier, including unknown ones, in
    /// declaration order.
    #[must_use]
    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    /// Returns the validated mandatory qualifiers.
    #[must_use]
    pub const fn trust_qualifiers(&self) -> &TrustQualifiers {
        &self.trust_qualifiers
    }

    /// Returns the criteria sent with discovery requests.
    #[must_use]
    pub const fn discovery_criteria(&self) -> &DiscoveryCriteria {
        &self.discovery_criteria
    }

    /// Returns descriptive metadata.
    #[must_use]
    pub const fn metadata(&self) -> &PolicyMetadata {
        &self.metadata
    }

    /// Returns the SHA-256 fingerprint of the mandatory qualifiers.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint(qualifiers: &TrustQualifiers) -> PolicyResult<String> {
    let canonical =
        serde_json::to_vec(qualifiers).map_err(|err| PolicyError::Parse(err.to_string()))?;
    let digest = Sha256::digest(&canonical);
    Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}
