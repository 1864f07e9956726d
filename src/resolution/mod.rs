//! Endpoint resolution: live discovery first, trust cache second.
//!
//! Resolution is one-shot. Each phase completes before the next begins and
//! an exhausted resolution is a normal outcome, not an error.

pub mod domain;
pub mod services;
