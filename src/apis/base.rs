use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::app::ports::{PayloadPort, SourceAdapterPort};
use crate::common::constants::DATE_PLACEHOLDER;
use crate::domain::{Entity, Source};
use crate::error::{MergeError, Result};
use crate::observability::metrics;

/// Turns one feed's text into candidate entities.
pub trait FeedParser: Send + Sync {
    fn source(&self) -> Source;

    fn parse(&self, text: &str) -> Result<Vec<Entity>>;
}

const PDF_MAGIC: &[u8] = b"%PDF";

/// Feeds are UTF-8 or Latin-1 depending on the publisher; PDF feeds are reduced to their
/// text layer first.
pub fn decode_payload(bytes: &[u8]) -> Result<String> {
    if bytes.starts_with(PDF_MAGIC) {
        return extract_pdf_text(bytes);
    }
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    Ok(match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    })
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    // The extractor panics on some malformed documents.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(MergeError::Pdf(e.to_string())),
        Err(_) => Err(MergeError::Pdf(format!(
            "extractor aborted on a {} byte document",
            bytes.len()
        ))),
    }
}

/// Locations to try in order. A dated location is tried for `today` and then one day
/// earlier per step, `lookback_days` times.
pub fn expand_location(location: &str, today: NaiveDate, lookback_days: u32) -> Vec<String> {
    if !location.contains(DATE_PLACEHOLDER) {
        return vec![location.to_string()];
    }
    (0..=i64::from(lookback_days))
        .map(|days| {
            let date = today - Duration::days(days);
            location.replace(DATE_PLACEHOLDER, &date.format("%Y%m%d").to_string())
        })
        .collect()
}

/// A feed adapter: loads the payload at `location` and hands it to the parser.
pub struct BaseFeed {
    pub location: String,
    pub lookback_days: u32,
    payloads: Arc<dyn PayloadPort>,
    parser: Box<dyn FeedParser>,
}

impl BaseFeed {
    pub fn new(
        location: impl Into<String>,
        lookback_days: u32,
        payloads: Arc<dyn PayloadPort>,
        parser: Box<dyn FeedParser>,
    ) -> Self {
        Self {
            location: location.into(),
            lookback_days,
            payloads,
            parser,
        }
    }

    async fn fetch_text(&self) -> Result<String> {
        let candidates = expand_location(&self.location, Local::now().date_naive(), self.lookback_days);
        let mut last_error = None;
        for location in candidates {
            match self.payloads.load(&location).await {
                Ok(bytes) => {
                    debug!("{}: fetched {} bytes from {}", self.source(), bytes.len(), location);
                    match decode_payload(&bytes) {
                        Ok(text) => return Ok(text),
                        Err(e) => {
                            debug!("{}: {} could not be decoded: {}", self.source(), location, e);
                            last_error = Some(e);
                        }
                    }
                }
                Err(e) => {
                    debug!("{}: {} unavailable: {}", self.source(), location, e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| MergeError::Api {
            message: format!("no location to fetch for {}", self.source()),
        }))
    }
}

#[async_trait]
impl SourceAdapterPort for BaseFeed {
    fn source(&self) -> Source {
        self.parser.source()
    }

    async fn fetch_candidates(&self) -> Result<Vec<Entity>> {
        let text = match self.fetch_text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("{}: fetch failed: {}", self.source(), e);
                metrics::sources::fetch_error(self.source());
                return Err(e);
            }
        };
        let candidates = self.parser.parse(&text)?;
        if candidates.is_empty() && !text.trim().is_empty() {
            metrics::sources::fetch_error(self.source());
            return Err(MergeError::MalformedRecord {
                source_name: self.source().to_string(),
                message: format!("no recognizable rows in {} bytes", text.len()),
            });
        }
        info!("📥 {}: {} candidates", self.source(), candidates.len());
        metrics::sources::fetch_success(self.source(), candidates.len());
        Ok(candidates)
    }
}
