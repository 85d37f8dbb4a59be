// One handler per feed, plus the document-generation pass that runs before them

pub mod capability;
pub mod document;
pub mod instant_payment;
pub mod service;
pub mod settlement;

use super::SourceHandler;
use crate::domain::Source;

pub use capability::{CqlHandler, DetectaFlowHandler};
pub use document::generate_missing_documents;
pub use instant_payment::SpiHandler;
pub use service::{CtcHandler, PcpsHandler, PcrHandler, SilocHandler, SlcHandler};
pub use settlement::{SitrafHandler, StrHandler};

/// Handler for a feed; `None` for the internal origins.
pub fn handler_for(source: Source) -> Option<Box<dyn SourceHandler>> {
    let handler: Box<dyn SourceHandler> = match source {
        Source::Str => Box::new(StrHandler),
        Source::Sitraf => Box::new(SitrafHandler),
        Source::Spi => Box::new(SpiHandler),
        Source::Slc => Box::new(SlcHandler),
        Source::Ctc => Box::new(CtcHandler),
        Source::Siloc => Box::new(SilocHandler),
        Source::Pcps => Box::new(PcpsHandler),
        Source::Pcr => Box::new(PcrHandler),
        Source::Cql => Box::new(CqlHandler),
        Source::DetectaFlow => Box::new(DetectaFlowHandler),
        Source::Base | Source::Document => return None,
    };
    Some(handler)
}

/// Every feed handler, in merge order.
pub fn default_handlers() -> Vec<Box<dyn SourceHandler>> {
    Source::MERGE_ORDER.iter().filter_map(|s| handler_for(*s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_handlers_follow_merge_order() {
        let sources: Vec<Source> = default_handlers().iter().map(|h| h.source()).collect();
        assert_eq!(sources, Source::MERGE_ORDER.to_vec());
    }
}
