//! Port definitions for trust cache persistence.

mod store;

pub use store::{TrustCacheStore, TrustCacheStoreError, TrustCacheStoreResult};
