//! MCP trust resolver: picks a trusted MCP server endpoint.
//!
//! The resolver queries a discovery registry, filters candidates against a
//! trust policy and falls back to previously verified endpoints held in a
//! local trust cache when live discovery yields nothing usable.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure decision logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP, files, memory)
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`policy`]: Policy loading, qualifier validation and matching
//! - [`discovery`]: Registry queries and response decoding
//! - [`trust_cache`]: Persisted record of verified endpoints
//! - [`resolution`]: The live-then-cache resolution protocol
//! - [`config`]: Runtime settings

pub mod config;
pub mod discovery;
pub mod policy;
pub mod resolution;
pub mod trust_cache;
