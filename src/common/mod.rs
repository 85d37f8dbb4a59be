// Shared helpers used across the merge pipeline

pub mod constants;
pub mod document;
pub mod text;
