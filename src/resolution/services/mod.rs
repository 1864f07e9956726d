//! Resolution services.

mod orchestrator;

pub use orchestrator::{ResolutionOptions, ResolutionOrchestrator};
