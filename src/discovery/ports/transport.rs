//! Transport port used to fetch registry responses.

use crate::discovery::domain::DiscoveryResult;
use async_trait::async_trait;
use reqwest::Url;

/// Fetches raw registry response bodies.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    /// Issues a GET for `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::discovery::domain::DiscoveryError::Transport`] when
    /// the registry cannot be reached and
    /// [`crate::discovery::domain::DiscoveryError::HttpStatus`] for
    /// non-success responses.
    async fn fetch(&self, url: &Url) -> DiscoveryResult<String>;
}
