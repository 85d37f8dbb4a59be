use chrono::{DateTime, Utc};
use tracing::info;

use crate::common::document;
use crate::domain::{Source, Update};
use crate::pipeline::processing::merge::MergeReport;
use crate::pipeline::registry::CanonicalRegistry;

/// Derives a document from the ISPB for every entity whose document is missing or invalid.
pub fn generate_missing_documents(registry: &mut CanonicalRegistry, now: DateTime<Utc>) -> MergeReport {
    let mut report = MergeReport::new(Source::Document);
    for entity in registry.iter_mut() {
        report.received += 1;
        if entity.has_valid_document() {
            report.up_to_date += 1;
            continue;
        }
        let derived = document::from_ispb(entity.ispb);
        entity.apply(Source::Document, Update::Document(derived), now);
        report.updated += 1;
    }
    info!("{}", report);
    report
}
