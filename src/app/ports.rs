use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Entity, Source};
use crate::error::Result;
use crate::pipeline::diff::ChangeReport;

#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<HttpGetResult, String>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Reads raw bytes from a location: an `http(s)://` URL or a filesystem path.
#[async_trait]
pub trait PayloadPort: Send + Sync {
    async fn load(&self, location: &str) -> Result<Vec<u8>>;
}

/// The published registry the run starts from.
#[async_trait]
pub trait CanonicalStorePort: Send + Sync {
    async fn load_canonical(&self) -> Result<Vec<Entity>>;
}

/// One upstream feed.
#[async_trait]
pub trait SourceAdapterPort: Send + Sync {
    fn source(&self) -> Source;

    async fn fetch_candidates(&self) -> Result<Vec<Entity>>;
}

/// Where a run with changes is published.
#[async_trait]
pub trait OutputPort: Send + Sync {
    async fn publish(&self, entities: &[Entity], report: &ChangeReport, now: DateTime<Utc>) -> Result<()>;
}
