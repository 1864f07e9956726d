//! In-memory trust cache store.

use crate::trust_cache::{
    domain::TrustLedger,
    ports::{TrustCacheStore, TrustCacheStoreError, TrustCacheStoreResult},
};
use async_trait::async_trait;
use std::io;
use std::sync::{Arc, RwLock};

/// Thread-safe store keeping the encoded ledger in memory.
///
/// The ledger is held in its encoded form so that tests can seed corrupt
/// contents and observe exactly what would have been written to disk.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTrustCacheStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    contents: Option<String>,
    writes: usize,
    reject_writes: bool,
}

impl InMemoryTrustCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `contents` as if previously written.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.write() {
            state.contents = Some(contents.into());
        }
        store
    }

    /// Makes subsequent saves fail with a storage error.
    pub fn reject_writes(&self, reject: bool) {
        if let Ok(mut state) = self.state.write() {
            state.reject_writes = reject;
        }
    }

    /// Returns the stored contents.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.contents.clone())
    }

    /// Returns how many saves succeeded.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state.read().map(|state| state.writes).unwrap_or_default()
    }
}

fn poisoned(err: impl ToString) -> TrustCacheStoreError {
    TrustCacheStoreError::io(io::Error::other(err.to_string()))
}

#[async_trait]
impl TrustCacheStore for InMemoryTrustCacheStore {
    async fn load(&self) -> TrustCacheStoreResult<TrustLedger> {
        let state = self.state.read().map_err(poisoned)?;
        state.contents.as_deref().map_or_else(
            || Ok(TrustLedger::new()),
            |contents| TrustLedger::from_json_str(contents).map_err(TrustCacheStoreError::corrupt),
        )
    }

    async fn save(&self, ledger: &TrustLedger) -> TrustCacheStoreResult<()> {
        let encoded = ledger
            .to_json_string()
            .map_err(TrustCacheStoreError::encode)?;
        let mut state = self.state.write().map_err(poisoned)?;
        if state.reject_writes {
            return Err(TrustCacheStoreError::io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "writes rejected",
            )));
        }
        state.contents = Some(encoded);
        state.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_owned()
    }
}
