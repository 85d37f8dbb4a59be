use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::app::ports::{OutputPort, PayloadPort};
use crate::common::constants::{
    CANONICAL_FILE, CHANGELOG_FILE, CHANGELOG_HEADING, CHANGELOG_LINK, CSV_FILE, MARKDOWN_FILE,
    RELEASE_NOTES_FILE, SQL_FILE, XML_FILE,
};
use crate::domain::Entity;
use crate::error::{MergeError, Result};
use crate::pipeline::diff::ChangeReport;

use super::renderers;

/// Writes the merged registry with its CSV, Markdown, SQL and XML exports, the release
/// notes and the updated changelog to a directory.
pub struct FileOutputWriter {
    pub output_dir: PathBuf,
    /// Changelog to prepend the new entry to
    pub changelog_location: Option<String>,
    payloads: Arc<dyn PayloadPort>,
}

impl FileOutputWriter {
    pub fn new(output_dir: PathBuf, changelog_location: Option<String>, payloads: Arc<dyn PayloadPort>) -> Self {
        Self {
            output_dir,
            changelog_location,
            payloads,
        }
    }

    async fn ensure_output_directory(&self) -> Result<()> {
        if !self.output_dir.exists() {
            tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
                MergeError::Config(format!(
                    "Failed to create output directory {:?}: {}",
                    self.output_dir, e
                ))
            })?;
            debug!("Created output directory: {:?}", self.output_dir);
        }
        Ok(())
    }

    async fn write(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        tokio::fs::write(&path, content).await?;
        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }

    async fn previous_changelog(&self) -> String {
        let Some(location) = &self.changelog_location else {
            return String::new();
        };
        match self.payloads.load(location).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Could not load changelog from {}: {}, starting a new one", location, e);
                String::new()
            }
        }
    }
}

/// Prepends a dated entry right below the `## Changelog` heading.
pub fn prepend_changelog(previous: &str, notes: &str, date: &str) -> String {
    let entry = format!("### {} - {}\n\n{}\n", date, CHANGELOG_LINK, notes);
    let previous = previous.replace("\r\n", "\n");
    let heading = format!("{}\n\n", CHANGELOG_HEADING);

    match previous.find(&heading) {
        Some(at) => {
            let split = at + heading.len();
            format!("{}{}{}", &previous[..split], entry, &previous[split..])
        }
        None if previous.trim().is_empty() => format!("{}{}", heading, entry),
        None => format!("{}{}\n{}", heading, entry, previous),
    }
}

#[async_trait]
impl OutputPort for FileOutputWriter {
    async fn publish(&self, entities: &[Entity], report: &ChangeReport, now: DateTime<Utc>) -> Result<()> {
        self.ensure_output_directory().await?;

        let json = serde_json::to_vec_pretty(entities)?;
        let path = self.write(CANONICAL_FILE, &json).await?;
        info!("💾 Saved {} participants to {}", entities.len(), path.display());

        self.write(CSV_FILE, &renderers::render_csv(entities)?).await?;
        self.write(MARKDOWN_FILE, renderers::render_markdown(entities).as_bytes()).await?;
        self.write(SQL_FILE, renderers::render_sql(entities).as_bytes()).await?;
        self.write(XML_FILE, &renderers::render_xml(entities)?).await?;
        debug!("Exports written to {}", self.output_dir.display());

        let notes = report.render();
        self.write(RELEASE_NOTES_FILE, notes.as_bytes()).await?;

        let date = now.with_timezone(&Local).format("%Y-%m-%d").to_string();
        let changelog = prepend_changelog(&self.previous_changelog().await, &notes, &date);
        let path = self.write(CHANGELOG_FILE, changelog.as_bytes()).await?;
        info!("Changelog updated at {}", path.display());
        Ok(())
    }
}
