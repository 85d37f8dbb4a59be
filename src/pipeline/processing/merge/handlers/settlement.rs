//! Settlement-system feeds keyed by clearing code. Both can introduce new participants.

use tracing::debug;

use crate::common::text::names_equal;
use crate::domain::{Entity, Source, Update};
use crate::pipeline::processing::conflation::MatchPolicy;
use crate::pipeline::processing::merge::{SourceHandler, UnmatchedPolicy};

/// STR: the central bank's reserve-transfer participant list. Owns long and short names.
pub struct StrHandler;

impl SourceHandler for StrHandler {
    fn source(&self) -> Source {
        Source::Str
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::CLEARING_CODE
    }

    fn on_unmatched(&self) -> UnmatchedPolicy {
        UnmatchedPolicy::Insert
    }

    fn screen(&self, candidate: &Entity) -> Option<&'static str> {
        (candidate.clearing_code == 0).then_some("no clearing code")
    }

    fn updates(&self, current: &Entity, candidate: &Entity) -> Vec<Update> {
        let mut updates = Vec::new();
        if !candidate.long_name.is_empty() && !names_equal(&current.long_name, &candidate.long_name) {
            updates.push(Update::LongName(candidate.long_name.clone()));
        }
        if !candidate.short_name.is_empty() && !names_equal(&current.short_name, &candidate.short_name) {
            updates.push(Update::ShortName(candidate.short_name.clone()));
        }
        updates
    }
}

/// SITRAF: confirms participants and adds missing ones; it never rewrites existing fields.
pub struct SitrafHandler;

impl SourceHandler for SitrafHandler {
    fn source(&self) -> Source {
        Source::Sitraf
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::CLEARING_CODE
    }

    fn on_unmatched(&self) -> UnmatchedPolicy {
        UnmatchedPolicy::Insert
    }

    fn screen(&self, candidate: &Entity) -> Option<&'static str> {
        (candidate.clearing_code == 0).then_some("no clearing code")
    }

    fn updates(&self, current: &Entity, candidate: &Entity) -> Vec<Update> {
        if !names_equal(&current.long_name, &candidate.long_name) {
            debug!(
                "SITRAF name differs for {}: '{}' vs '{}'",
                current.compe_string(),
                current.long_name,
                candidate.long_name
            );
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(compe: u16, long: &str, short: &str) -> Entity {
        Entity {
            clearing_code: compe,
            long_name: long.to_string(),
            short_name: short.to_string(),
            ..Entity::default()
        }
    }

    #[test]
    fn test_str_rewrites_names_only_when_different() {
        let current = entity(1, "Banco do Brasil S.A.", "BCO DO BRASIL S.A.");
        let same = entity(1, "BANCO DO BRASIL S.A.", "bco do brasil s.a.");
        assert!(StrHandler.updates(&current, &same).is_empty());

        let renamed = entity(1, "Banco do Brasil S.A.", "BB S.A.");
        assert_eq!(
            StrHandler.updates(&current, &renamed),
            vec![Update::ShortName("BB S.A.".to_string())]
        );
    }

    #[test]
    fn test_str_screens_zero_clearing_code() {
        assert!(StrHandler.screen(&entity(0, "X", "X")).is_some());
        assert!(StrHandler.screen(&entity(1, "X", "X")).is_none());
    }

    #[test]
    fn test_prepare_insert_derives_document_and_short_name() {
        let candidate = Entity {
            clearing_code: 999,
            ispb: 60746948,
            long_name: "BANCO NOVO S.A. - EM FORMACAO".to_string(),
            ..Entity::default()
        };
        let inserted = SitrafHandler.prepare_insert(candidate);
        assert_eq!(inserted.document, "60746948000112");
        assert_eq!(inserted.short_name, "BANCO NOVO S.A.");
    }
}
