//! Adapter implementations for the policy source port.

pub mod file;
pub mod memory;

pub use file::FilePolicySource;
pub use memory::InMemoryPolicySource;
