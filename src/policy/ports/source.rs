//! Source port for policy documents.

use crate::policy::domain::{PolicyDocument, PolicyResult};

/// Supplies the policy document at startup.
pub trait PolicySource: Send + Sync {
    /// Reads and validates the policy document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::policy::domain::PolicyError`] when the document
    /// cannot be read or fails validation.
    fn load(&self) -> PolicyResult<PolicyDocument>;

    /// Describes where the document comes from, for diagnostics.
    fn location(&self) -> String;
}
