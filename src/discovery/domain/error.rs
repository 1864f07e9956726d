//! Error types for registry discovery.

use thiserror::Error;

/// Result type for registry discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Failures raised while querying the discovery registry.
///
/// Every variant is recoverable: the resolution orchestrator treats each of
/// them as "zero candidates" and moves on to the trust cache.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscoveryError {
    /// The registry could not be reached, or the request timed out.
    #[error("registry transport failure: {0}")]
    Transport(String),

    /// The registry answered with a non-success status code.
    #[error("registry responded with HTTP status {0}")]
    HttpStatus(u16),

    /// The registry body was not a JSON document of the expected shape.
    #[error("registry response could not be decoded: {0}")]
    Decode(String),
}

impl DiscoveryError {
    /// Returns a short, stable label for structured log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::HttpStatus(_) => "http_status",
            Self::Decode(_) => "decode",
        }
    }
}
