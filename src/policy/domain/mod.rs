//! Domain model for trust policies.
//!
//! [`PolicyDocument`] is the validated form of the policy file. Its
//! [`TrustQualifiers`] are built once at load time so that matching never
//! has to deal with missing or ill-typed qualifiers.

mod document;
mod error;
pub mod matcher;
mod qualifier;

pub use document::{PolicyDocument, PolicyMetadata};
pub use error::{PolicyError, PolicyResult};
pub use matcher::{QualifierKind, first_failing_qualifier, first_match, passes};
pub use qualifier::{ProviderAllowList, Qualifier, TrustQualifiers};
