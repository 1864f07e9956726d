//! Server-sent events address derived from a resolved endpoint.

use std::fmt;
use thiserror::Error;

/// Errors returned when a resolved URL cannot be used for an SSE session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EndpointError {
    /// The URL is empty after trimming.
    #[error("endpoint URL must not be empty")]
    EmptyUrl,

    /// The URL does not start with `http://` or `https://`.
    #[error("endpoint URL '{0}' must start with 'http://' or 'https://'")]
    UnsupportedScheme(String),
}

/// The `/sse` address a transport connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEndpoint(String);

impl SseEndpoint {
    /// Path segment appended to the resolved URL.
    pub const PATH: &'static str = "/sse";

    /// Derives the SSE address for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] when `url` is empty or not HTTP(S).
    pub fn from_resolved(url: &str) -> Result<Self, EndpointError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(EndpointError::EmptyUrl);
        }
        let lowered = trimmed.to_ascii_lowercase();
        if !lowered.starts_with("http://") && !lowered.starts_with("https://") {
            return Err(EndpointError::UnsupportedScheme(trimmed.to_owned()));
        }
        let base = trimmed.trim_end_matches('/');
        Ok(Self(format!("{base}{}", Self::PATH)))
    }

    /// Returns the SSE address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SseEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
