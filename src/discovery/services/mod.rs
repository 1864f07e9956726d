//! Application services for registry discovery.

mod client;

pub use client::{RegistryClient, build_discovery_url};
