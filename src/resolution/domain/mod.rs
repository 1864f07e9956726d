//! Resolution outcomes and the audit record of a resolution.

mod endpoint;
mod report;
mod sse;

pub use endpoint::{ResolutionSource, ResolvedEndpoint};
pub use report::{CacheUpdate, LivePhaseOutcome, ResolutionPhase, ResolutionReport};
pub use sse::{EndpointError, SseEndpoint};
