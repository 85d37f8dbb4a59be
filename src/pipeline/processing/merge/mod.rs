//! Per-source merge passes.
//!
//! Each feed has a [`SourceHandler`] that says how its candidates are matched, which
//! fields they own and what happens when nothing matches. [`applier::run_pass`] drives a
//! handler over a batch of candidates and returns a [`MergeReport`].

pub mod applier;
pub mod handlers;

use serde::Serialize;
use std::fmt;

use super::conflation::MatchPolicy;
use crate::common::document;
use crate::common::text::derive_short_name;
use crate::domain::{Entity, Source, Update};

pub use applier::run_pass;

/// What happened to a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Matched and at least one owned field was written
    Updated,
    /// Matched, nothing to write
    UpToDate,
    /// No match, inserted as a new participant
    Added,
    /// No match and the source does not insert
    NotFound,
    /// Filtered out before resolution
    Ignored,
}

impl MergeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeOutcome::Updated => "updated",
            MergeOutcome::UpToDate => "up_to_date",
            MergeOutcome::Added => "added",
            MergeOutcome::NotFound => "not_found",
            MergeOutcome::Ignored => "ignored",
        }
    }
}

/// What a pass does with a candidate no strategy could place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    Skip,
    Insert,
}

/// Counters for one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub source: Source,
    pub received: usize,
    pub updated: usize,
    pub up_to_date: usize,
    pub added: usize,
    pub not_found: usize,
    pub ignored: usize,
    /// Candidates for which at least one strategy returned several entities
    pub inconclusive: usize,
}

impl MergeReport {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            received: 0,
            updated: 0,
            up_to_date: 0,
            added: 0,
            not_found: 0,
            ignored: 0,
            inconclusive: 0,
        }
    }

    pub fn record(&mut self, outcome: MergeOutcome) {
        self.received += 1;
        match outcome {
            MergeOutcome::Updated => self.updated += 1,
            MergeOutcome::UpToDate => self.up_to_date += 1,
            MergeOutcome::Added => self.added += 1,
            MergeOutcome::NotFound => self.not_found += 1,
            MergeOutcome::Ignored => self.ignored += 1,
        }
    }

    /// Candidates that were placed on an existing entity.
    pub fn matched(&self) -> usize {
        self.updated + self.up_to_date
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} received, {} updated, {} up to date, {} added, {} not found, {} ignored, {} inconclusive",
            self.source,
            self.received,
            self.updated,
            self.up_to_date,
            self.added,
            self.not_found,
            self.ignored,
            self.inconclusive
        )
    }
}

/// Merge rules for one feed.
pub trait SourceHandler: Send + Sync {
    fn source(&self) -> Source;

    fn policy(&self) -> MatchPolicy;

    fn on_unmatched(&self) -> UnmatchedPolicy {
        UnmatchedPolicy::Skip
    }

    /// Reason to drop the candidate before resolution, if any.
    fn screen(&self, _candidate: &Entity) -> Option<&'static str> {
        None
    }

    /// Writes the candidate implies for the matched entity. Empty means up to date.
    fn updates(&self, current: &Entity, candidate: &Entity) -> Vec<Update>;

    /// Shapes an unmatched candidate into a registry entry.
    fn prepare_insert(&self, mut candidate: Entity) -> Entity {
        if !document::is_valid(&candidate.document) {
            candidate.document = document::from_ispb(candidate.ispb);
        }
        if candidate.short_name.trim().is_empty() {
            candidate.short_name = derive_short_name(&candidate.long_name);
        }
        candidate.clear_changes();
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = MergeReport::new(Source::Slc);
        report.record(MergeOutcome::Updated);
        report.record(MergeOutcome::UpToDate);
        report.record(MergeOutcome::NotFound);
        assert_eq!(report.received, 3);
        assert_eq!(report.matched(), 2);
        assert_eq!(report.not_found, 1);
        assert!(report.to_string().starts_with("SLC: 3 received"));
    }
}
