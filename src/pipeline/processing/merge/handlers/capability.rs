//! Capability lists. Presence in the feed turns the flag on; absence never turns it off.

use crate::domain::{Entity, Flag, Source, Update};
use crate::pipeline::processing::conflation::MatchPolicy;
use crate::pipeline::processing::merge::SourceHandler;

/// CQL: legal-cheque clearing participants.
pub struct CqlHandler;

impl SourceHandler for CqlHandler {
    fn source(&self) -> Source {
        Source::Cql
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::ISPB_ONLY
    }

    fn updates(&self, current: &Entity, _candidate: &Entity) -> Vec<Update> {
        if current.legal_cheque.is_yes() {
            Vec::new()
        } else {
            vec![Update::LegalCheque(Flag::Yes)]
        }
    }
}

/// Detecta Flow: fraud-detection service participants.
pub struct DetectaFlowHandler;

impl SourceHandler for DetectaFlowHandler {
    fn source(&self) -> Source {
        Source::DetectaFlow
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::ISPB_ONLY
    }

    fn updates(&self, current: &Entity, _candidate: &Entity) -> Vec<Update> {
        if current.detecta_flow.is_yes() {
            Vec::new()
        } else {
            vec![Update::DetectaFlow(Flag::Yes)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_only_turn_on() {
        let off = Entity {
            legal_cheque: Flag::No,
            ..Entity::default()
        };
        assert_eq!(
            CqlHandler.updates(&off, &Entity::default()),
            vec![Update::LegalCheque(Flag::Yes)]
        );

        let on = Entity {
            detecta_flow: Flag::Yes,
            ..Entity::default()
        };
        assert!(DetectaFlowHandler.updates(&on, &Entity::default()).is_empty());
    }
}
