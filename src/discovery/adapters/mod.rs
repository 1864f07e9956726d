//! Adapter implementations for the registry transport port.

pub mod http;
pub mod memory;

pub use http::{HttpRegistryTransport, HttpRegistryTransportConfig};
pub use memory::InMemoryRegistryTransport;
