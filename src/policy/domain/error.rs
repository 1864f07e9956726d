//! Error types for policy loading and validation.

use thiserror::Error;

/// Result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Configuration errors raised while loading a policy.
///
/// These are fatal: no resolution is attempted with an invalid policy.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The policy source could not be read.
    #[error("failed to read policy document '{location}': {reason}")]
    Read {
        /// File path or other source description.
        location: String,
        /// Underlying failure.
        reason: String,
    },

    /// The policy is not valid JSON or lacks a required field.
    #[error("invalid policy document: {0}")]
    Parse(String),

    /// The registry discovery endpoint is not a valid URL.
    #[error("registry discovery endpoint '{value}' is not a valid URL: {reason}")]
    InvalidRegistryEndpoint {
        /// Configured endpoint.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The registry discovery endpoint uses a scheme other than HTTP(S).
    #[error("registry discovery endpoint '{0}' must use http or https")]
    UnsupportedRegistryScheme(String),

    /// A required qualifier is absent.
    #[error("policy is missing required qualifier '{0}'")]
    MissingQualifier(&'static str),

    /// A required qualifier is declared more than once.
    #[error("policy declares qualifier '{0}' more than once")]
    DuplicateQualifier(&'static str),

    /// A required qualifier has a value of the wrong shape.
    #[error("qualifier '{name}' has an invalid value: {reason}")]
    InvalidQualifierValue {
        /// Qualifier name.
        name: &'static str,
        /// Expected shape.
        reason: String,
    },

    /// The policy directory template failed to render.
    #[error("failed to render policy directory: {0}")]
    Render(String),
}
