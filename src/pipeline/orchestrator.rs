use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{info, warn};

use super::processing::merge::handlers::{default_handlers, generate_missing_documents};
use super::processing::merge::{run_pass, MergeReport, SourceHandler};
use super::registry::CanonicalRegistry;
use crate::domain::{Entity, Source};

/// Candidates fetched for this run, grouped by feed.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    by_source: HashMap<Source, Vec<Entity>>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds candidates for `source`, appending to any already present.
    pub fn insert(&mut self, source: Source, candidates: Vec<Entity>) {
        self.by_source.entry(source).or_default().extend(candidates);
    }

    pub fn take(&mut self, source: Source) -> Vec<Entity> {
        self.by_source.remove(&source).unwrap_or_default()
    }
}

/// Per-pass reports of one run, in execution order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub passes: Vec<MergeReport>,
}

impl RunReport {
    pub fn pass(&self, source: Source) -> Option<&MergeReport> {
        self.passes.iter().find(|p| p.source == source)
    }

    pub fn total_added(&self) -> usize {
        self.passes.iter().map(|p| p.added).sum()
    }

    pub fn total_updated(&self) -> usize {
        self.passes.iter().map(|p| p.updated).sum()
    }
}

/// Runs the document-generation pass and then every feed handler in order.
pub struct ReconciliationEngine {
    handlers: Vec<Box<dyn SourceHandler>>,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self {
            handlers: default_handlers(),
        }
    }

    /// Engine with a custom handler list, run in the given order.
    pub fn with_handlers(handlers: Vec<Box<dyn SourceHandler>>) -> Self {
        Self { handlers }
    }

    pub fn sources(&self) -> Vec<Source> {
        self.handlers.iter().map(|h| h.source()).collect()
    }

    pub fn run(
        &self,
        registry: &mut CanonicalRegistry,
        mut candidates: CandidateSet,
        now: DateTime<Utc>,
    ) -> RunReport {
        info!("🔄 Merging into {} registered participants", registry.len());
        let mut report = RunReport::default();

        report.passes.push(generate_missing_documents(registry, now));

        for (step, handler) in self.handlers.iter().enumerate() {
            let source = handler.source();
            let batch = candidates.take(source);
            if batch.is_empty() {
                warn!(
                    "Step {}/{}: no {} candidates, pass skipped",
                    step + 1,
                    self.handlers.len(),
                    source
                );
                report.passes.push(MergeReport::new(source));
                continue;
            }
            info!(
                "Step {}/{}: merging {} {} candidates",
                step + 1,
                self.handlers.len(),
                batch.len(),
                source
            );
            report.passes.push(run_pass(registry, handler.as_ref(), batch, now));
        }

        info!(
            "✅ Merge finished: {} participants, {} added, {} updated",
            registry.len(),
            report.total_added(),
            report.total_updated()
        );
        report
    }
}
