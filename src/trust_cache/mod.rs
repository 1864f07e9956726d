//! Trust cache: previously verified endpoints with a freshness window.
//!
//! Entries are keyed by registry item identity. An entry younger than the
//! freshness window is left untouched when the same item is verified again;
//! older entries are replaced in place. Entries are never removed.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
