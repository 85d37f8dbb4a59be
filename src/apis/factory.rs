use std::sync::Arc;
use tracing::info;

use super::base::{BaseFeed, FeedParser};
use super::parsers::{
    CqlParser, CtcParser, DetectaFlowParser, PcpsParser, PcrParser, SilocParser, SitrafParser, SlcParser,
    SpiParser, StrParser,
};
use crate::app::ports::{PayloadPort, SourceAdapterPort};
use crate::config::{Config, FeedSettings};
use crate::domain::Source;

pub fn create_parser(source: Source) -> Option<Box<dyn FeedParser>> {
    match source {
        Source::Str => Some(Box::new(StrParser)),
        Source::Spi => Some(Box::new(SpiParser)),
        Source::Slc => Some(Box::new(SlcParser)),
        Source::Siloc => Some(Box::new(SilocParser)),
        Source::Sitraf => Some(Box::new(SitrafParser)),
        Source::Ctc => Some(Box::new(CtcParser)),
        Source::Pcps => Some(Box::new(PcpsParser)),
        Source::Cql => Some(Box::new(CqlParser)),
        Source::DetectaFlow => Some(Box::new(DetectaFlowParser)),
        Source::Pcr => Some(Box::new(PcrParser)),
        Source::Base | Source::Document => None,
    }
}

pub fn create_feed(settings: &FeedSettings, payloads: Arc<dyn PayloadPort>) -> Option<Arc<dyn SourceAdapterPort>> {
    let parser = create_parser(settings.source)?;
    Some(Arc::new(BaseFeed::new(
        settings.location.clone(),
        settings.lookback_days,
        payloads,
        parser,
    )))
}

/// Adapters for every enabled feed, in merge order.
pub fn create_feeds(config: &Config, payloads: Arc<dyn PayloadPort>) -> Vec<Arc<dyn SourceAdapterPort>> {
    config
        .feeds()
        .iter()
        .filter(|settings| {
            if !settings.enabled {
                info!("{} disabled in configuration", settings.source);
            }
            settings.enabled
        })
        .filter_map(|settings| create_feed(settings, payloads.clone()))
        .collect()
}
