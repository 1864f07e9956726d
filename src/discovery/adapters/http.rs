//! HTTP registry transport backed by `reqwest`.

use crate::discovery::{
    domain::{DiscoveryError, DiscoveryResult},
    ports::RegistryTransport,
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

/// Default upper bound for a registry request.
pub const DEFAULT_REGISTRY_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`HttpRegistryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRegistryTransportConfig {
    /// Timeout applied to the full request lifecycle.
    pub timeout: Duration,
    /// User agent sent with discovery requests.
    pub user_agent: String,
}

impl Default for HttpRegistryTransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_REGISTRY_TIMEOUT,
            user_agent: concat!("mcp-trust-resolver/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Registry transport issuing bounded GET requests.
#[derive(Debug, Clone)]
pub struct HttpRegistryTransport {
    client: Client,
}

impl HttpRegistryTransport {
    /// Creates a transport with the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(config: &HttpRegistryTransportConfig) -> DiscoveryResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| DiscoveryError::Transport(format!("http client build failed: {err}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RegistryTransport for HttpRegistryTransport {
    async fn fetch(&self, url: &Url) -> DiscoveryResult<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| DiscoveryError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|err| DiscoveryError::Transport(err.to_string()))
    }
}
