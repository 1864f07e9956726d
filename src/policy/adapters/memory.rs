//! In-memory policy source.

use crate::policy::{
    domain::{PolicyDocument, PolicyResult},
    ports::PolicySource,
};

/// Policy source holding the document text in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryPolicySource {
    contents: String,
}

impl InMemoryPolicySource {
    /// Creates a source returning `contents` on every load.
    #[must_use]
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

impl PolicySource for InMemoryPolicySource {
    fn load(&self) -> PolicyResult<PolicyDocument> {
        PolicyDocument::from_json_str(&self.contents)
    }

    fn location(&self) -> String {
        "<memory>".to_owned()
    }
}
