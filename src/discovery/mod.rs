//! Registry discovery for candidate MCP endpoints.
//!
//! The discovery context issues a single GET against the registry discovery
//! endpoint and decodes the `{ "data": [...] }` payload into registry items.
//! It follows the same hexagonal split as the other contexts:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The registry client in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
