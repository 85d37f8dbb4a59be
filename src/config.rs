use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::common::constants::*;
use crate::domain::Source;
use crate::error::{MergeError, Result};

/// Run configuration, read from `merge.toml`. Every section is optional; missing values
/// fall back to the public feed locations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub canonical: CanonicalConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Per-feed overrides keyed by source key (`str`, `spi`, `detecta_flow`, ...)
    #[serde(default)]
    pub sources: BTreeMap<String, SourceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CanonicalConfig {
    pub location: String,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            location: CANONICAL_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// Existing changelog to prepend to; none starts a fresh one
    #[serde(default = "default_changelog")]
    pub changelog: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            changelog: default_changelog(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_changelog() -> Option<String> {
    Some(CHANGELOG_URL.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    pub location: Option<String>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Days to walk back when the location carries a `{date}` placeholder
    pub lookback_days: Option<u32>,
}

fn default_enabled() -> bool {
    true
}

/// A feed's effective settings after applying overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    pub source: Source,
    pub location: String,
    pub enabled: bool,
    pub lookback_days: u32,
}

pub fn default_location(source: Source) -> Option<&'static str> {
    let location = match source {
        Source::Str => STR_URL,
        Source::Spi => SPI_URL,
        Source::Slc => SLC_URL,
        Source::Siloc => SILOC_URL,
        Source::Sitraf => SITRAF_URL,
        Source::Ctc => CTC_URL,
        Source::Pcps => PCPS_URL,
        Source::Cql => CQL_URL,
        Source::DetectaFlow => DETECTA_FLOW_URL,
        Source::Pcr => PCR_URL,
        Source::Base | Source::Document => return None,
    };
    Some(location)
}

impl Config {
    /// Loads `path`. A missing file yields the defaults; an unreadable or invalid one is
    /// a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at '{}', using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| MergeError::Config(format!("Failed to read config file '{}': {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        for key in config.sources.keys() {
            let source: Source = key.parse().map_err(MergeError::Config)?;
            if default_location(source).is_none() {
                return Err(MergeError::Config(format!("'{}' is not a feed", key)));
            }
        }
        Ok(config)
    }

    /// Effective settings for `source`, or `None` for internal origins.
    pub fn feed(&self, source: Source) -> Option<FeedSettings> {
        let default = default_location(source)?;
        let overrides = self.sources.get(source.key());
        let default_lookback = if source == Source::Spi { DEFAULT_SPI_LOOKBACK_DAYS } else { 0 };
        Some(FeedSettings {
            source,
            location: overrides
                .and_then(|o| o.location.clone())
                .unwrap_or_else(|| default.to_string()),
            enabled: overrides.map(|o| o.enabled).unwrap_or(true),
            lookback_days: overrides.and_then(|o| o.lookback_days).unwrap_or(default_lookback),
        })
    }

    /// Settings for every feed, in merge order.
    pub fn feeds(&self) -> Vec<FeedSettings> {
        Source::MERGE_ORDER.iter().filter_map(|s| self.feed(*s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_feed() {
        let config = Config::default();
        let feeds = config.feeds();
        assert_eq!(feeds.len(), Source::MERGE_ORDER.len());
        assert!(feeds.iter().all(|f| f.enabled));
        assert_eq!(config.feed(Source::Spi).unwrap().lookback_days, DEFAULT_SPI_LOOKBACK_DAYS);
        assert_eq!(config.output.directory, PathBuf::from("result"));
        assert!(config.feed(Source::Base).is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_toml(
            r#"
            [canonical]
            location = "data/bancos.json"

            [output]
            directory = "out"

            [sources.slc]
            location = "feeds/slc.txt"

            [sources.detecta_flow]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.canonical.location, "data/bancos.json");
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.feed(Source::Slc).unwrap().location, "feeds/slc.txt");
        assert!(!config.feed(Source::DetectaFlow).unwrap().enabled);
        assert_eq!(config.feed(Source::Str).unwrap().location, STR_URL);
    }

    #[test]
    fn test_unknown_source_rejected() {
        let result = Config::from_toml("[sources.boleto]\nenabled = false\n");
        assert!(matches!(result, Err(MergeError::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load(Path::new("/nonexistent/merge.toml")).unwrap();
        assert_eq!(config.canonical.location, CANONICAL_URL);
    }
}
