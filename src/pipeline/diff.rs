//! Before/after comparison of a run and the human-readable change report.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

use crate::common::document;
use crate::domain::Entity;

/// Outcome of comparing the merged universe with the pristine snapshot.
#[derive(Debug, Clone)]
pub enum RunDelta {
    NoChanges,
    Changed(ChangeReport),
}

#[derive(Debug, Clone, Default)]
pub struct ChangeReport {
    /// Entities whose ISPB was not in the snapshot
    pub added: Vec<Entity>,
    /// Entities that differ from every snapshot entity sharing their ISPB
    pub updated: Vec<Entity>,
}

impl ChangeReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty()
    }

    /// Markdown report: added participants, then updated ones with one line per field.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if !self.added.is_empty() {
            out.push_str(&format!("- Added {} {}\n", self.added.len(), plural(self.added.len())));
            for entity in &self.added {
                out.push_str(&format!(
                    "  - {} - {} - {}\n",
                    entity.compe_string(),
                    entity.short_name,
                    document::format(&entity.document)
                ));
            }
        }

        if !self.updated.is_empty() {
            out.push_str(&format!(
                "- Updated {} {}\n",
                self.updated.len(),
                plural(self.updated.len())
            ));
            for entity in &self.updated {
                out.push_str(&format!(
                    "  - {} - {} - {}\n",
                    entity.compe_string(),
                    entity.short_name,
                    document::format(&entity.document)
                ));
                for (field, change) in entity.changes().iter() {
                    out.push_str(&format!(
                        "    - **{}** ({}): {} **->** {}\n",
                        field,
                        change.source.label().to_uppercase(),
                        change.old_value,
                        change.new_value
                    ));
                }
            }
        }

        out
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "bank"
    } else {
        "banks"
    }
}

/// Stamps missing timestamps, drops entries without identity and orders by clearing code.
pub fn finalize(mut entities: Vec<Entity>, now: DateTime<Utc>) -> Vec<Entity> {
    for entity in &mut entities {
        if entity.date_registered.is_none() {
            entity.date_registered = Some(now);
        }
        if entity.date_updated.is_none() {
            entity.date_updated = Some(now);
        }
    }
    // Banco do Brasil is the one participant legitimately registered under ISPB zero
    entities.retain(|e| e.ispb != 0 || e.clearing_code == 1);
    entities.sort_by_key(|e| (e.clearing_code, e.ispb));
    entities
}

/// Entities of `merged` not equivalent to any pristine entity, split into added and updated.
pub fn classify(merged: &[Entity], pristine: &[Entity]) -> RunDelta {
    log_totals(merged);

    let mut by_ispb: HashMap<u32, Vec<&Entity>> = HashMap::new();
    for entity in pristine {
        by_ispb.entry(entity.ispb).or_default().push(entity);
    }

    let mut report = ChangeReport::default();
    for entity in merged {
        match by_ispb.get(&entity.ispb) {
            None => report.added.push(entity.clone()),
            Some(previous) if previous.iter().any(|p| p.equivalent(entity)) => {}
            Some(_) => report.updated.push(entity.clone()),
        }
    }

    if report.is_empty() {
        info!("No new data or updated information");
        return RunDelta::NoChanges;
    }
    info!(
        "Added {} and updated {} participants",
        report.added.len(),
        report.updated.len()
    );
    RunDelta::Changed(report)
}

fn log_totals(entities: &[Entity]) {
    let mut by_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for entity in entities {
        let kind = if entity.kind.is_empty() { "-" } else { entity.kind.as_str() };
        *by_kind.entry(kind).or_default() += 1;
    }
    info!("Total participants: {}", entities.len());
    for (kind, count) in by_kind {
        info!("  {}: {}", kind, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Source, Update};

    fn bank(compe: u16, ispb: u32, short: &str) -> Entity {
        Entity {
            clearing_code: compe,
            ispb,
            document: document::from_ispb(ispb),
            short_name: short.to_string(),
            date_registered: Some(DateTime::<Utc>::MIN_UTC),
            date_updated: Some(DateTime::<Utc>::MIN_UTC),
            ..Entity::default()
        }
    }

    #[test]
    fn test_no_changes() {
        let pristine = vec![bank(237, 60746948, "BRADESCO")];
        assert!(matches!(classify(&pristine.clone(), &pristine), RunDelta::NoChanges));
    }

    #[test]
    fn test_added_and_updated_split_by_ispb() {
        let pristine = vec![bank(237, 60746948, "BRADESCO")];
        let mut changed = pristine[0].clone();
        changed.apply(Source::Str, Update::ShortName("BCO BRADESCO".to_string()), Utc::now());
        let merged = vec![changed, bank(341, 60701190, "ITAU")];

        let RunDelta::Changed(report) = classify(&merged, &pristine) else {
            panic!("expected changes");
        };
        assert_eq!(report.added.len(), 1);
        assert_eq!(report.updated.len(), 1);

        let text = report.render();
        assert!(text.contains("- Added 1 bank\n"));
        assert!(text.contains("  - 341 - ITAU - 60.701.190/0001-04\n"));
        assert!(text.contains("- Updated 1 bank\n"));
        assert!(text.contains("    - **ShortName** (STR): BRADESCO **->** BCO BRADESCO\n"));
    }

    #[test]
    fn test_finalize_filters_and_orders() {
        let now = Utc::now();
        let mut orphan = bank(0, 0, "ORPHAN");
        orphan.date_registered = None;
        let entities = vec![bank(341, 60701190, "ITAU"), orphan, bank(1, 0, "BB")];

        let result = finalize(entities, now);
        let codes: Vec<u16> = result.iter().map(|e| e.clearing_code).collect();
        assert_eq!(codes, vec![1, 341]);
    }

    #[test]
    fn test_finalize_stamps_missing_dates() {
        let now = Utc::now();
        let mut entity = bank(237, 60746948, "BRADESCO");
        entity.date_registered = None;
        let result = finalize(vec![entity], now);
        assert_eq!(result[0].date_registered, Some(now));
    }
}
