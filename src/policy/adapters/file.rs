//! File-backed policy source.

use crate::policy::{
    domain::{PolicyDocument, PolicyError, PolicyResult},
    ports::PolicySource,
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

/// Reads the policy document from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePolicySource {
    path: Utf8PathBuf,
}

impl FilePolicySource {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the configured path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn read_error(&self, reason: impl ToString) -> PolicyError {
        PolicyError::Read {
            location: self.path.to_string(),
            reason: reason.to_string(),
        }
    }

    fn read_contents(&self) -> PolicyResult<String> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| self.read_error("path must include a file name"))?;
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| self.read_error(err))?;
        dir.read_to_string(file_name)
            .map_err(|err| self.read_error(err))
    }
}

impl PolicySource for FilePolicySource {
    fn load(&self) -> PolicyResult<PolicyDocument> {
        let contents = self.read_contents()?;
        PolicyDocument::from_json_str(&contents)
    }

    fn location(&self) -> String {
        self.path.to_string()
    }
}
