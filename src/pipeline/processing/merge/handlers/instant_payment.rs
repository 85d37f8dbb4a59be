use crate::domain::{Entity, Source, Update};
use crate::pipeline::processing::conflation::MatchPolicy;
use crate::pipeline::processing::merge::{SourceHandler, UnmatchedPolicy};

/// SPI: instant-payment participants. Owns the PIX type and start date as a pair.
pub struct SpiHandler;

impl SourceHandler for SpiHandler {
    fn source(&self) -> Source {
        Source::Spi
    }

    fn policy(&self) -> MatchPolicy {
        MatchPolicy::NAME_THEN_ISPB
    }

    fn on_unmatched(&self) -> UnmatchedPolicy {
        UnmatchedPolicy::Insert
    }

    fn updates(&self, current: &Entity, candidate: &Entity) -> Vec<Update> {
        let pair = vec![
            Update::PixType(candidate.pix_type.clone()),
            Update::DatePixStarted(candidate.date_pix_started.clone()),
        ];
        if pair.iter().all(|u| u.is_current(current)) {
            Vec::new()
        } else {
            pair
        }
    }
}
