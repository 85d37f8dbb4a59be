use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::app::ports::{CanonicalStorePort, OutputPort, SourceAdapterPort};
use crate::domain::{Entity, Source};
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::diff::{classify, finalize, RunDelta};
use crate::pipeline::{CandidateSet, CanonicalRegistry, ReconciliationEngine};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Changed { added: usize, updated: usize, total: usize },
    NoChanges,
}

impl RunOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            RunOutcome::Changed { .. } => "changed",
            RunOutcome::NoChanges => "no_changes",
        }
    }
}

/// Loads the published registry, merges every feed into it and publishes the result
/// when anything changed.
pub struct MergeUseCase {
    store: Arc<dyn CanonicalStorePort>,
    adapters: Vec<Arc<dyn SourceAdapterPort>>,
    output: Arc<dyn OutputPort>,
    engine: ReconciliationEngine,
}

impl MergeUseCase {
    pub fn new(
        store: Arc<dyn CanonicalStorePort>,
        adapters: Vec<Arc<dyn SourceAdapterPort>>,
        output: Arc<dyn OutputPort>,
    ) -> Self {
        Self::with_engine(store, adapters, output, ReconciliationEngine::new())
    }

    pub fn with_engine(
        store: Arc<dyn CanonicalStorePort>,
        adapters: Vec<Arc<dyn SourceAdapterPort>>,
        output: Arc<dyn OutputPort>,
        engine: ReconciliationEngine,
    ) -> Self {
        Self {
            store,
            adapters,
            output,
            engine,
        }
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunOutcome> {
        let canonical = self.store.load_canonical().await.map_err(|e| {
            error!("Canonical registry unavailable: {}", e);
            e
        })?;
        let mut registry = CanonicalRegistry::new(canonical);
        let pristine = registry.snapshot();

        let candidates = self.fetch_all().await;
        self.engine.run(&mut registry, candidates, now);

        let merged = finalize(registry.into_entities(), now);
        let outcome = match classify(&merged, &pristine) {
            RunDelta::NoChanges => RunOutcome::NoChanges,
            RunDelta::Changed(report) => {
                self.output.publish(&merged, &report, now).await?;
                RunOutcome::Changed {
                    added: report.added.len(),
                    updated: report.updated.len(),
                    total: merged.len(),
                }
            }
        };

        metrics::run::outcome(outcome.label());
        Ok(outcome)
    }

    /// Fetches every feed concurrently and collects them in configuration order. A failed
    /// feed contributes no candidates.
    async fn fetch_all(&self) -> CandidateSet {
        let handles: Vec<(Source, JoinHandle<Result<Vec<Entity>>>)> = self
            .adapters
            .iter()
            .map(|adapter| {
                let adapter = adapter.clone();
                (adapter.source(), tokio::spawn(async move { adapter.fetch_candidates().await }))
            })
            .collect();

        let mut candidates = CandidateSet::new();
        for (source, handle) in handles {
            match handle.await {
                Ok(Ok(entities)) => candidates.insert(source, entities),
                Ok(Err(e)) => warn!("{}: skipped, {}", source, e),
                Err(e) => warn!("{}: fetch task failed: {}", source, e),
            }
        }
        info!("Fetched {} feeds", self.adapters.len());
        candidates
    }
}
