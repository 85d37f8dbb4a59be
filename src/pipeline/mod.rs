// Merge pipeline: canonical registry, per-source passes, and the before/after diff

pub mod diff;
pub mod orchestrator;
pub mod processing;
pub mod registry;

pub use diff::{RunDelta, classify};
pub use orchestrator::{CandidateSet, ReconciliationEngine, RunReport};
pub use registry::CanonicalRegistry;
