//! Read-only holder for the loaded policy.

use crate::policy::{
    domain::{PolicyDocument, PolicyResult},
    ports::PolicySource,
};
use std::sync::Arc;
use tracing::{error, info};

/// Holds the policy document for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct PolicyStore {
    document: Arc<PolicyDocument>,
}

impl PolicyStore {
    /// Loads and validates the policy from `source`.
    ///
    /// # Errors
    ///
    /// Returns the source's [`crate::policy::domain::PolicyError`]; callers
    /// must treat it as fatal.
    pub fn load(source: &impl PolicySource) -> PolicyResult<Self> {
        let document = source.load().inspect_err(|err| {
            error!(location = %source.location(), error = %err, "policy document rejected");
        })?;
        info!(
            location = %source.location(),
            registry = %document.registry_discovery_endpoint(),
            cache_enabled = document.cache_enabled(),
            fingerprint = %document.fingerprint(),
            "policy document loaded"
        );
        Ok(Self::from_document(document))
    }

    /// Wraps an already validated document.
    #[must_use]
    pub fn from_document(document: PolicyDocument) -> Self {
        Self {
            document: Arc::new(document),
        }
    }

    /// Returns the policy document.
    #[must_use]
    pub fn document(&self) -> &PolicyDocument {
        &self.document
    }

    /// Returns a shared handle to the policy document.
    #[must_use]
    pub fn shared(&self) -> Arc<PolicyDocument> {
        Arc::clone(&self.document)
    }
}
