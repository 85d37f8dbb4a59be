pub mod merge_use_case;
pub mod ports;

pub use merge_use_case::{MergeUseCase, RunOutcome};
