//! Trust cache store implementations.

pub mod file;
pub mod memory;

pub use file::FileTrustCacheStore;
pub use memory::InMemoryTrustCacheStore;
