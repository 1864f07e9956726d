//! Registry item decoding.

use super::{DiscoveryError, DiscoveryResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Verification marker reported by the registry.
///
/// Registries report either a JSON boolean or a string such as `"true"`.
/// The two spellings are distinct: matching compares them exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerifiedFlag {
    /// Boolean marker.
    Flag(bool),
    /// Free-form string marker.
    Text(String),
}

impl fmt::Display for VerifiedFlag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(formatter, "{flag}"),
            Self::Text(text) => write!(formatter, "\"{text}\""),
        }
    }
}

/// Candidate endpoint metadata returned by the discovery registry.
///
/// Identity is [`RegistryItem::id`]. Fields the registry sends beyond the
/// ones used for trust decisions are retained so the cache snapshot keeps
/// the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryItem {
    id: String,
    #[serde(default)]
    name: String,
    url: String,
    provider: String,
    verified: VerifiedFlag,
    relevance_score: f64,
    uptime: f64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl RegistryItem {
    /// Returns the registry identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the provider label.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the verification marker.
    #[must_use]
    pub const fn verified(&self) -> &VerifiedFlag {
        &self.verified
    }

    /// Returns the registry relevance score.
    #[must_use]
    pub const fn relevance_score(&self) -> f64 {
        self.relevance_score
    }

    /// Returns the reported uptime ratio.
    #[must_use]
    pub const fn uptime(&self) -> f64 {
        self.uptime
    }

    /// Returns fields not used by trust evaluation.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Items decoded from one registry response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryPage {
    /// Well-formed items in registry order.
    pub items: Vec<RegistryItem>,
    /// Reasons for entries of `data` that could not be decoded.
    pub rejected: Vec<String>,
}

/// Decodes a registry response body.
///
/// A body without a `data` member (or with `data: null`) is a valid empty
/// response. Malformed entries inside `data` are skipped and reported in
/// [`RegistryPage::rejected`] so one bad record does not hide the others.
///
/// # Errors
///
/// Returns [`DiscoveryError::Decode`] when the body is not JSON, is not a
/// JSON object, or carries a non-array `data` member.
pub fn decode_registry_items(body: &str) -> DiscoveryResult<RegistryPage> {
    let document: Value =
        serde_json::from_str(body).map_err(|err| DiscoveryError::Decode(err.to_string()))?;
    let Value::Object(mut root) = document else {
        return Err(DiscoveryError::Decode(
            "response body is not a JSON object".to_owned(),
        ));
    };

    let entries = match root.remove("data") {
        None | Some(Value::Null) => return Ok(RegistryPage::default()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(DiscoveryError::Decode(
                "`data` member is not an array".to_owned(),
            ));
        }
    };

    let mut page = RegistryPage::default();
    for (position, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RegistryItem>(entry) {
            Ok(item) => page.items.push(item),
            Err(err) => page.rejected.push(format!("data[{position}]: {err}")),
        }
    }
    Ok(page)
}
