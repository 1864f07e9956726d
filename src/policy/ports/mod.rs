//! Port contracts for policy loading.

mod source;

pub use source::PolicySource;
