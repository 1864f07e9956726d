//! Domain model for registry discovery.
//!
//! Registry items are decoded from untrusted registry responses and never
//! constructed directly by callers. Discovery criteria describe the query
//! sent to the registry and are snapshotted into trust cache entries.

mod criteria;
mod error;
mod item;

pub use criteria::DiscoveryCriteria;
pub use error::{DiscoveryError, DiscoveryResult};
pub use item::{RegistryItem, RegistryPage, VerifiedFlag, decode_registry_items};
