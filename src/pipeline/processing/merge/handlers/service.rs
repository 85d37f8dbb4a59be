//! Clearing-house service feeds. None of them introduce participants; each owns a few
//! fields and fills in a missing document when it carries a valid one.

use tracing::debug;

use crate::common::text::names_equal;
use crate::domain::{Entity, Source, Update};
use crate::pipeline::processing::conflation::MatchPolicy;
use crate::pipeline::processing::merge::SourceHandler;

fn document_fill(source: Source, current: &Entity, candidate: &Entity) -> Option<Update> {
    if current.has_valid_document() {
        return None;
    }
    if candidate.has_valid_document() {
        return Some(Update::Document(candidate.document.clone()));
    }
    debug!("{}: {} has no valid document and the feed has none either", source, current);
    None
}

/// Both members of a composite pair when either differs, otherwise nothing.
fn composite(current: &Entity, first: Update, second: Update) -> Vec<Update> {
    if first.is_current(current) && second.is_current(current) {
        Vec::new()
    } else {
        vec![first, second]
    }
}

/// SLC: settlement-cycle participants. Supplies a short name when the entity has none.
pub struct SlcHandler;

impl SourceHandler for SlcHandler {
    fn source(&self) -> Source {
        Source::Slc
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::DOCUMENT_FIRST
    }

    fn updates(&self, current: &Entity, candidate: &Entity) -> Vec<Update> {
        let mut updates: Vec<Update> = document_fill(self.source(), current, candidate).into_iter().collect();
        if current.short_name.trim().is_empty() && !candidate.long_name.is_empty() {
            updates.push(Update::ShortName(candidate.long_name.clone()));
        }
        updates
    }
}

/// CTC: owns the product list.
pub struct CtcHandler;

impl SourceHandler for CtcHandler {
    fn source(&self) -> Source {
        Source::Ctc
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::DOCUMENT_FIRST
    }

    fn updates(&self, current: &Entity, candidate: &Entity) -> Vec<Update> {
        let mut updates: Vec<Update> = document_fill(self.source(), current, candidate).into_iter().collect();
        if !candidate.products.is_empty() && current.products != candidate.products {
            updates.push(Update::Products(candidate.products.clone()));
        }
        updates
    }
}

/// SILOC: owns charge and credit-document capability as a pair.
pub struct SilocHandler;

impl SourceHandler for SilocHandler {
    fn source(&self) -> Source {
        Source::Siloc
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::ISPB_THEN_NAME
    }

    fn updates(&self, current: &Entity, candidate: &Entity) -> Vec<Update> {
        let mut updates: Vec<Update> = document_fill(self.source(), current, candidate).into_iter().collect();
        updates.extend(composite(
            current,
            Update::Charge(candidate.charge),
            Update::CreditDocument(candidate.credit_document),
        ));
        updates
    }
}

/// PCPS: owns salary portability.
pub struct PcpsHandler;

impl SourceHandler for PcpsHandler {
    fn source(&self) -> Source {
        Source::Pcps
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::DOCUMENT_FIRST
    }

    fn updates(&self, current: &Entity, candidate: &Entity) -> Vec<Update> {
        let mut updates: Vec<Update> = document_fill(self.source(), current, candidate).into_iter().collect();
        if !candidate.salary_portability.is_empty()
            && !names_equal(&current.salary_portability, &candidate.salary_portability)
        {
            updates.push(Update::SalaryPortability(candidate.salary_portability.clone()));
        }
        updates
    }
}

/// PCR: owns the PCR and PCR-P flags as a pair.
pub struct PcrHandler;

impl SourceHandler for PcrHandler {
    fn source(&self) -> Source {
        Source::Pcr
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::DOCUMENT_FIRST
    }

    fn updates(&self, current: &Entity, candidate: &Entity) -> Vec<Update> {
        let mut updates: Vec<Update> = document_fill(self.source(), current, candidate).into_iter().collect();
        updates.extend(composite(current, Update::Pcr(candidate.pcr), Update::Pcrp(candidate.pcrp)));
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Flag;
    use std::collections::BTreeSet;

    fn products(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_document_filled_only_when_invalid() {
        let current = Entity::default();
        let candidate = Entity {
            document: "60746948000112".to_string(),
            ..Entity::default()
        };
        assert_eq!(
            SlcHandler.updates(&current, &candidate),
            vec![Update::Document("60746948000112".to_string())]
        );

        let valid = Entity {
            document: "60701190000104".to_string(),
            short_name: "ITAU".to_string(),
            ..Entity::default()
        };
        assert!(SlcHandler.updates(&valid, &candidate).is_empty());
    }

    #[test]
    fn test_slc_fills_missing_short_name() {
        let current = Entity {
            document: "60746948000112".to_string(),
            ..Entity::default()
        };
        let candidate = Entity {
            long_name: "BANCO BRADESCO S.A.".to_string(),
            ..Entity::default()
        };
        assert_eq!(
            SlcHandler.updates(&current, &candidate),
            vec![Update::ShortName("BANCO BRADESCO S.A.".to_string())]
        );
    }

    #[test]
    fn test_ctc_products_compared_as_sets() {
        let current = Entity {
            document: "60746948000112".to_string(),
            products: products(&["DOC", "TED"]),
            ..Entity::default()
        };
        let same = Entity {
            products: products(&["TED", "DOC"]),
            ..Entity::default()
        };
        assert!(CtcHandler.updates(&current, &same).is_empty());

        let more = Entity {
            products: products(&["TED", "DOC", "Boleto"]),
            ..Entity::default()
        };
        assert_eq!(CtcHandler.updates(&current, &more).len(), 1);
    }

    #[test]
    fn test_siloc_writes_both_flags_when_one_differs() {
        let current = Entity {
            document: "60746948000112".to_string(),
            charge: Flag::Yes,
            credit_document: Flag::Yes,
            ..Entity::default()
        };
        let candidate = Entity {
            charge: Flag::Yes,
            credit_document: Flag::No,
            ..Entity::default()
        };
        assert_eq!(
            SilocHandler.updates(&current, &candidate),
            vec![Update::Charge(Flag::Yes), Update::CreditDocument(Flag::No)]
        );
    }

    #[test]
    fn test_pcps_salary_portability() {
        let current = Entity {
            document: "60746948000112".to_string(),
            salary_portability: "Banco Folha".to_string(),
            ..Entity::default()
        };
        let same = Entity {
            salary_portability: "BANCO FOLHA".to_string(),
            ..Entity::default()
        };
        assert!(PcpsHandler.updates(&current, &same).is_empty());
    }

    #[test]
    fn test_pcr_pair() {
        let current = Entity {
            document: "60746948000112".to_string(),
            ..Entity::default()
        };
        let candidate = Entity {
            pcr: Flag::Yes,
            pcrp: Flag::No,
            ..Entity::default()
        };
        assert_eq!(
            PcrHandler.updates(&current, &candidate),
            vec![Update::Pcr(Flag::Yes), Update::Pcrp(Flag::No)]
        );
    }
}
