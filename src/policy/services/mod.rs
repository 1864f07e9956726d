//! Application services for policy access.

mod directory;
mod store;

pub use directory::render_policy_directory;
pub use store::PolicyStore;
