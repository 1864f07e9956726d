//! In-memory registry transport for tests and offline runs.

use crate::discovery::{
    domain::{DiscoveryError, DiscoveryResult},
    ports::RegistryTransport,
};
use async_trait::async_trait;
use reqwest::Url;
use std::sync::{Arc, RwLock};

/// Registry transport answering every request with a configured response.
///
/// Requested URLs are recorded so callers can assert on the query that was
/// sent. Until a response is configured the transport behaves like an
/// unreachable registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistryTransport {
    state: Arc<RwLock<InMemoryTransportState>>,
}

#[derive(Debug, Default)]
struct InMemoryTransportState {
    response: Option<DiscoveryResult<String>>,
    requests: Vec<Url>,
}

impl InMemoryRegistryTransport {
    /// Creates a transport with no configured response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that always returns `body`.
    #[must_use]
    pub fn with_body(body: impl Into<String>) -> Self {
        let transport = Self::new();
        transport.respond_with(Ok(body.into()));
        transport
    }

    /// Replaces the configured response.
    pub fn respond_with(&self, response: DiscoveryResult<String>) {
        if let Ok(mut state) = self.state.write() {
            state.response = Some(response);
        }
    }

    /// Returns every URL requested so far.
    #[must_use]
    pub fn requested_urls(&self) -> Vec<Url> {
        self.state
            .read()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RegistryTransport for InMemoryRegistryTransport {
    async fn fetch(&self, url: &Url) -> DiscoveryResult<String> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DiscoveryError::Transport(err.to_string()))?;
        state.requests.push(url.clone());
        state.response.clone().unwrap_or_else(|| {
            Err(DiscoveryError::Transport(
                "no registry response configured".to_owned(),
            ))
        })
    }
}
