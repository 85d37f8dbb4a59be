use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{MergeOutcome, MergeReport, SourceHandler, UnmatchedPolicy};
use crate::domain::Entity;
use crate::observability::metrics;
use crate::pipeline::processing::conflation::Resolution;
use crate::pipeline::registry::CanonicalRegistry;

/// Merges every candidate of one feed into the registry.
pub fn run_pass(
    registry: &mut CanonicalRegistry,
    handler: &dyn SourceHandler,
    candidates: Vec<Entity>,
    now: DateTime<Utc>,
) -> MergeReport {
    let source = handler.source();
    let mut report = MergeReport::new(source);

    for candidate in candidates {
        let outcome = merge_candidate(registry, handler, candidate, now, &mut report);
        metrics::merge::candidate(source, outcome);
        report.record(outcome);
    }

    info!("{}", report);
    report
}

fn merge_candidate(
    registry: &mut CanonicalRegistry,
    handler: &dyn SourceHandler,
    candidate: Entity,
    now: DateTime<Utc>,
    report: &mut MergeReport,
) -> MergeOutcome {
    let source = handler.source();

    if let Some(reason) = handler.screen(&candidate) {
        debug!("{}: ignoring '{}': {}", source, candidate.long_name, reason);
        return MergeOutcome::Ignored;
    }

    match handler.policy().resolve(registry, &candidate, source) {
        Resolution::Matched { index, strategy } => {
            let Some(entity) = registry.get_mut(index) else {
                return MergeOutcome::NotFound;
            };
            let updates = handler.updates(entity, &candidate);
            if updates.is_empty() {
                debug!("{}: {} up to date (by {})", source, entity, strategy.name());
                return MergeOutcome::UpToDate;
            }
            for update in updates {
                entity.apply(source, update, now);
            }
            debug!("{}: {} updated (by {})", source, entity, strategy.name());
            MergeOutcome::Updated
        }
        Resolution::NotFound { inconclusive } => {
            if inconclusive {
                report.inconclusive += 1;
            }
            match handler.on_unmatched() {
                UnmatchedPolicy::Insert if !inconclusive => insert(registry, handler, candidate),
                _ => {
                    warn!(
                        "{}: no match for {} | {} | {}",
                        source,
                        candidate.compe_string(),
                        candidate.ispb_string(),
                        candidate.long_name
                    );
                    MergeOutcome::NotFound
                }
            }
        }
    }
}

fn insert(registry: &mut CanonicalRegistry, handler: &dyn SourceHandler, candidate: Entity) -> MergeOutcome {
    let source = handler.source();
    // A participant is keyed by ISPB; never add a second one under the same ISPB
    if registry.contains_ispb(candidate.ispb) {
        warn!(
            "{}: ISPB {} already registered under another identity, not adding '{}'",
            source,
            candidate.ispb_string(),
            candidate.long_name
        );
        return MergeOutcome::NotFound;
    }
    let entity = handler.prepare_insert(candidate);
    info!("{}: adding {}", source, entity);
    registry.insert(entity);
    MergeOutcome::Added
}
