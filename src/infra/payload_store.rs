use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::app::ports::{HttpClientPort, PayloadPort};
use crate::error::{MergeError, Result};

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Loads URLs through the HTTP port and everything else from disk.
pub struct LocationPayloadStore {
    http: Arc<dyn HttpClientPort>,
}

impl LocationPayloadStore {
    pub fn new(http: Arc<dyn HttpClientPort>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PayloadPort for LocationPayloadStore {
    async fn load(&self, location: &str) -> Result<Vec<u8>> {
        if !is_remote(location) {
            debug!("Reading {}", location);
            return Ok(tokio::fs::read(location).await?);
        }

        debug!("Downloading {}", location);
        let response = self
            .http
            .get(location)
            .await
            .map_err(|message| MergeError::Api { message })?;
        if !(200..300).contains(&response.status) {
            return Err(MergeError::Api {
                message: format!("GET {} returned {}", location, response.status),
            });
        }
        debug!("{} bytes of {} from {}", response.bytes.len(), response.content_type, location);
        Ok(response.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::HttpGetResult;
    use std::io::Write;

    struct FixedHttp(u16);

    #[async_trait]
    impl HttpClientPort for FixedHttp {
        async fn get(&self, _url: &str) -> std::result::Result<HttpGetResult, String> {
            Ok(HttpGetResult {
                status: self.0,
                bytes: b"payload".to_vec(),
                content_type: "text/csv".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_reads_local_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "local").unwrap();
        let store = LocationPayloadStore::new(Arc::new(FixedHttp(200)));
        let bytes = store.load(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(bytes, b"local");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let ok = LocationPayloadStore::new(Arc::new(FixedHttp(200)));
        assert_eq!(ok.load("https://example.test/a.csv").await.unwrap(), b"payload");

        let missing = LocationPayloadStore::new(Arc::new(FixedHttp(404)));
        assert!(matches!(
            missing.load("https://example.test/a.csv").await,
            Err(MergeError::Api { .. })
        ));
    }
}
