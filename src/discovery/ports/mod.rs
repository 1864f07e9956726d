//! Port contracts for registry discovery.

mod transport;

pub use transport::RegistryTransport;
