//! Entity resolution: finds the registry entry a feed candidate refers to.
//!
//! A [`MatchPolicy`] is an ordered list of [`MatchStrategy`] steps. Each step either
//! finds exactly one entity, finds several (inconclusive), or none; resolution stops at
//! the first step with a single hit.

use tracing::{debug, warn};

use crate::common::constants::ZERO_ROOT_EXCEPTION_NAME;
use crate::common::document;
use crate::common::text::{name_contains, names_equal};
use crate::domain::{Entity, Source};
use crate::pipeline::registry::CanonicalRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Same normalized document
    Document,
    /// Candidate long name equals the entity long name or short name
    Name,
    /// Entity ISPB equals the candidate document root, and the entity long name contains
    /// the candidate long name
    IspbRoot,
    /// Same clearing code
    ClearingCode,
    /// Same ISPB
    Ispb,
}

/// Result of a single strategy step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Single(usize),
    Inconclusive(usize),
    NoMatch,
    Skipped,
}

/// Final result of resolving one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched { index: usize, strategy: MatchStrategy },
    NotFound { inconclusive: bool },
}

impl MatchStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            MatchStrategy::Document => "document",
            MatchStrategy::Name => "name",
            MatchStrategy::IspbRoot => "ispb_root",
            MatchStrategy::ClearingCode => "clearing_code",
            MatchStrategy::Ispb => "ispb",
        }
    }

    pub fn apply(&self, registry: &CanonicalRegistry, candidate: &Entity) -> StepOutcome {
        let hits = match self {
            MatchStrategy::Document => {
                if candidate.document.is_empty() {
                    return StepOutcome::Skipped;
                }
                registry.find_all(|e| e.document == candidate.document)
            }
            MatchStrategy::Name => {
                if candidate.long_name.trim().is_empty() {
                    return StepOutcome::Skipped;
                }
                registry.find_all(|e| {
                    names_equal(&e.long_name, &candidate.long_name)
                        || (!e.short_name.trim().is_empty()
                            && names_equal(&e.short_name, &candidate.long_name))
                })
            }
            MatchStrategy::IspbRoot => {
                let root = match document::root(&candidate.document) {
                    Some(root) => root,
                    None => return StepOutcome::Skipped,
                };
                if root == 0 && !names_equal(&candidate.long_name, ZERO_ROOT_EXCEPTION_NAME) {
                    debug!("Zero document root for '{}', skipping ISPB root match", candidate.long_name);
                    return StepOutcome::Skipped;
                }
                registry.find_all(|e| e.ispb == root && name_contains(&e.long_name, &candidate.long_name))
            }
            MatchStrategy::ClearingCode => registry.find_all(|e| e.clearing_code == candidate.clearing_code),
            MatchStrategy::Ispb => registry.find_all(|e| e.ispb == candidate.ispb),
        };

        match hits.as_slice() {
            [] => StepOutcome::NoMatch,
            [index] => StepOutcome::Single(*index),
            many => StepOutcome::Inconclusive(many.len()),
        }
    }
}

/// Ordered strategies a source uses to find its target entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPolicy {
    strategies: &'static [MatchStrategy],
}

impl MatchPolicy {
    /// Document, then name, then ISPB root with name containment.
    pub const DOCUMENT_FIRST: MatchPolicy = MatchPolicy {
        strategies: &[MatchStrategy::Document, MatchStrategy::Name, MatchStrategy::IspbRoot],
    };
    pub const CLEARING_CODE: MatchPolicy = MatchPolicy {
        strategies: &[MatchStrategy::ClearingCode],
    };
    pub const NAME_THEN_ISPB: MatchPolicy = MatchPolicy {
        strategies: &[MatchStrategy::Name, MatchStrategy::Ispb],
    };
    pub const ISPB_THEN_NAME: MatchPolicy = MatchPolicy {
        strategies: &[MatchStrategy::Ispb, MatchStrategy::Name],
    };
    pub const ISPB_ONLY: MatchPolicy = MatchPolicy {
        strategies: &[MatchStrategy::Ispb],
    };

    /// Runs the strategies in order. An inconclusive step falls through to the next one.
    pub fn resolve(&self, registry: &CanonicalRegistry, candidate: &Entity, source: Source) -> Resolution {
        let mut inconclusive = false;
        for strategy in self.strategies {
            match strategy.apply(registry, candidate) {
                StepOutcome::Single(index) => {
                    return Resolution::Matched {
                        index,
                        strategy: *strategy,
                    }
                }
                StepOutcome::Inconclusive(count) => {
                    warn!(
                        "{}: {} entities match '{}' ({}) by {}, trying next strategy",
                        source,
                        count,
                        candidate.long_name,
                        candidate.ispb_string(),
                        strategy.name()
                    );
                    inconclusive = true;
                }
                StepOutcome::NoMatch | StepOutcome::Skipped => {}
            }
        }
        Resolution::NotFound { inconclusive }
    }
}
