use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::app::ports::{CanonicalStorePort, PayloadPort};
use crate::domain::Entity;
use crate::error::{MergeError, Result};

/// The published `bancos.json`, from a URL or a local file.
pub struct JsonCanonicalStore {
    location: String,
    payloads: Arc<dyn PayloadPort>,
}

impl JsonCanonicalStore {
    pub fn new(location: impl Into<String>, payloads: Arc<dyn PayloadPort>) -> Self {
        Self {
            location: location.into(),
            payloads,
        }
    }
}

#[async_trait]
impl CanonicalStorePort for JsonCanonicalStore {
    async fn load_canonical(&self) -> Result<Vec<Entity>> {
        let bytes = self
            .payloads
            .load(&self.location)
            .await
            .map_err(|e| MergeError::CanonicalStoreUnavailable(format!("{}: {}", self.location, e)))?;
        let entities: Vec<Entity> = serde_json::from_slice(&bytes)
            .map_err(|e| MergeError::CanonicalStoreUnavailable(format!("{}: {}", self.location, e)))?;
        info!("Loaded {} participants from {}", entities.len(), self.location);
        Ok(entities)
    }
}
