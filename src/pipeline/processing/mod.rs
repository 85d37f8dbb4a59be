// Candidate resolution against the registry and the per-source merge passes

pub mod conflation;
pub mod merge;
