//! Declarative trust policy for endpoint resolution.
//!
//! A policy names the discovery registry, whether verified endpoints are
//! cached, and the qualifiers a candidate must satisfy. The document is
//! loaded once, validated up front and then treated as read-only.
//!
//! - Domain types and the pure matcher in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Policy store and directory rendering in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
