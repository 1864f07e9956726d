//! Discovery criteria sent to the registry as query parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Query parameters for a registry discovery request.
///
/// Parameters are kept in key order so that the generated query string and
/// the snapshot stored alongside cache entries are both stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveryCriteria(BTreeMap<String, Value>);

impl DiscoveryCriteria {
    /// Creates an empty criteria set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the criteria used when a policy does not override them:
    /// up to three verified nutrition tools matching `recipe`.
    #[must_use]
    pub fn recipe_tools() -> Self {
        Self::empty()
            .with("limit", 3)
            .with("q", "recipe")
            .with("tags", "nutrition")
            .with("type", "tool")
            .with("verified", "true")
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw value for a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Iterates over parameters rendered as query-string values.
    ///
    /// Strings are emitted without quotes; numbers and booleans use their
    /// JSON spelling.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, String)> {
        self.0.iter().map(|(key, value)| {
            let rendered = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.as_str(), rendered)
        })
    }
}

impl Default for DiscoveryCriteria {
    fn default() -> Self {
        Self::recipe_tools()
    }
}
