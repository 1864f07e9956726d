//! Trust cache application services.

mod cache;

pub use cache::TrustCache;
