//! JSON file store with atomic replacement.

use crate::trust_cache::{
    domain::TrustLedger,
    ports::{TrustCacheStore, TrustCacheStoreError, TrustCacheStoreResult},
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use uuid::Uuid;

/// Stores the ledger as a JSON document on disk.
///
/// Writes go to a uniquely named sibling file that is then renamed over the
/// target, so readers see either the previous or the new ledger. Concurrent
/// writers resolve as last writer wins.
#[derive(Debug, Clone)]
pub struct FileTrustCacheStore {
    path: Utf8PathBuf,
}

impl FileTrustCacheStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

#[async_trait]
impl TrustCacheStore for FileTrustCacheStore {
    async fn load(&self) -> TrustCacheStoreResult<TrustLedger> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_ledger(&path))
            .await
            .map_err(TrustCacheStoreError::io)?
    }

    async fn save(&self, ledger: &TrustLedger) -> TrustCacheStoreResult<()> {
        let contents = ledger
            .to_json_string()
            .map_err(TrustCacheStoreError::encode)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &contents))
            .await
            .map_err(TrustCacheStoreError::io)?
    }

    fn location(&self) -> String {
        self.path.to_string()
    }
}

fn open_parent_dir(path: &Utf8Path) -> io::Result<(Dir, &str)> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("cache path must include a file name"))?;
    let dir = Dir::open_ambient_dir(parent_dir(path), ambient_authority())?;
    Ok((dir, file_name))
}

fn parent_dir(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

fn read_ledger(path: &Utf8Path) -> TrustCacheStoreResult<TrustLedger> {
    let contents = match open_parent_dir(path).and_then(|(dir, name)| dir.read_to_string(name)) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(TrustLedger::new()),
        Err(err) => return Err(TrustCacheStoreError::io(err)),
    };
    TrustLedger::from_json_str(&contents).map_err(TrustCacheStoreError::corrupt)
}

fn write_atomically(path: &Utf8Path, contents: &str) -> TrustCacheStoreResult<()> {
    let (dir, file_name) = open_parent_dir(path).map_err(TrustCacheStoreError::io)?;
    let staging = format!(".{file_name}.{}.tmp", Uuid::new_v4().simple());
    dir.write(&staging, contents)
        .map_err(TrustCacheStoreError::io)?;
    dir.rename(&staging, &dir, file_name).map_err(|err| {
        if let Err(cleanup) = dir.remove_file(&staging) {
            tracing::debug!(file = %staging, error = %cleanup, "staging file left behind");
        }
        TrustCacheStoreError::io(err)
    })
}
