//! Persistence port for the trust ledger.

use crate::trust_cache::domain::TrustLedger;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for trust cache persistence.
pub type TrustCacheStoreResult<T> = Result<T, TrustCacheStoreError>;

/// Durable storage for a [`TrustLedger`].
#[async_trait]
pub trait TrustCacheStore: Send + Sync {
    /// Loads the stored ledger.
    ///
    /// A store that has never been written yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns [`TrustCacheStoreError::Corrupt`] when the stored contents do
    /// not decode, or [`TrustCacheStoreError::Io`] on storage failure.
    async fn load(&self) -> TrustCacheStoreResult<TrustLedger>;

    /// Replaces the stored ledger in a single atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`TrustCacheStoreError`] when encoding or storage fails.
    async fn save(&self, ledger: &TrustLedger) -> TrustCacheStoreResult<()>;

    /// Describes where the ledger lives, for log events.
    fn location(&self) -> String;
}

/// Errors returned by trust cache stores.
#[derive(Debug, Clone, Error)]
pub enum TrustCacheStoreError {
    /// Stored contents could not be decoded into a ledger.
    #[error("corrupt trust cache: {0}")]
    Corrupt(Arc<dyn std::error::Error + Send + Sync>),

    /// The ledger could not be encoded.
    #[error("trust cache encoding failed: {0}")]
    Encode(Arc<dyn std::error::Error + Send + Sync>),

    /// Storage-layer failure.
    #[error("trust cache storage error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrustCacheStoreError {
    /// Wraps a decoding failure.
    pub fn corrupt(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Corrupt(Arc::new(err))
    }

    /// Wraps an encoding failure.
    pub fn encode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Encode(Arc::new(err))
    }

    /// Wraps a storage failure.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }

    /// Returns a stable label for log events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Corrupt(_) => "corrupt",
            Self::Encode(_) => "encode",
            Self::Io(_) => "io",
        }
    }
}
