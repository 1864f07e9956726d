//! Registry client issuing discovery queries.

use crate::discovery::{
    domain::{DiscoveryCriteria, DiscoveryResult, RegistryItem, decode_registry_items},
    ports::RegistryTransport,
};
use reqwest::Url;
use std::sync::Arc;
use tracing::{debug, warn};

/// Characters of the raw registry response kept in debug events.
const RESPONSE_EXCERPT_CHARS: usize = 2048;

/// Returns at most [`RESPONSE_EXCERPT_CHARS`] leading characters of `body`.
fn response_excerpt(body: &str) -> &str {
    body.char_indices()
        .nth(RESPONSE_EXCERPT_CHARS)
        .and_then(|(end, _)| body.get(..end))
        .unwrap_or(body)
}

/// Appends `criteria` to `endpoint` as query parameters.
///
/// An empty trailing `?` on the endpoint is absorbed; an existing non-empty
/// query is kept and the criteria are appended after it.
#[must_use]
pub fn build_discovery_url(endpoint: &Url, criteria: &DiscoveryCriteria) -> Url {
    let mut url = endpoint.clone();
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in criteria.query_pairs() {
            pairs.append_pair(key, &value);
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    url
}

/// Client for the discovery registry.
#[derive(Clone)]
pub struct RegistryClient<T>
where
    T: RegistryTransport,
{
    transport: Arc<T>,
    endpoint: Url,
}

impl<T> RegistryClient<T>
where
    T: RegistryTransport,
{
    /// Creates a client querying `endpoint` through `transport`.
    #[must_use]
    pub const fn new(transport: Arc<T>, endpoint: Url) -> Self {
        Self {
            transport,
            endpoint,
        }
    }

    /// Returns the configured discovery endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the URL that [`Self::discover`] requests for `criteria`.
    #[must_use]
    pub fn discovery_url(&self, criteria: &DiscoveryCriteria) -> Url {
        build_discovery_url(&self.endpoint, criteria)
    }

    /// Queries the registry once and returns its candidates in registry
    /// order.
    ///
    /// # Errors
    ///
    /// Returns the transport error when the request fails and
    /// [`crate::discovery::domain::DiscoveryError::Decode`] when the body is
    /// not a registry document.
    pub async fn discover(
        &self,
        criteria: &DiscoveryCriteria,
    ) -> DiscoveryResult<Vec<RegistryItem>> {
        let url = self.discovery_url(criteria);
        debug!(url = %url, "querying discovery registry");

        let body = self.transport.fetch(&url).await?;
        debug!(
            url = %url,
            bytes = body.len(),
            body = response_excerpt(&body),
            "registry response received"
        );
        let page = decode_registry_items(&body)?;
        for reason in &page.rejected {
            warn!(url = %url, reason = %reason, "skipping malformed registry entry");
        }

        debug!(candidates = page.items.len(), "registry response decoded");
        Ok(page.items)
    }
}
