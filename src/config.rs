//! YAML configuration.
//!
//! Every field is optional; an absent file means "all defaults". A config
//! looks like:
//!
//! ```yaml
//! sources:
//!   - kind: guardian
//!     name: Guardian
//!     path: dumps/guardian.json
//!   - kind: feed
//!     name: Austrian Local News
//!     path: dumps/vorarlberg_feeds.json
//!     language: de
//! scoring:
//!   accept_threshold: 6
//! categories:
//!   min_score: 2
//! digest:
//!   max_per_category: 5
//! batch:
//!   max_articles: 30
//! ```
//!
//! A `taxonomy` section replaces the built-in keyword lists; lists it leaves
//! out keep their defaults.

use crate::categorize::CategoryThresholds;
use crate::digest::DigestSettings;
use crate::scoring::ScoringWeights;
use crate::sources::Source;
use crate::taxonomy::KeywordTaxonomy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

pub const MAX_ARTICLES: usize = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Batch-level limits applied before categorization.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Newest accepted articles kept per run.
    pub max_articles: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_articles: MAX_ARTICLES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub sources: Vec<Source>,
    pub scoring: ScoringWeights,
    pub categories: CategoryThresholds,
    pub digest: DigestSettings,
    pub batch: BatchSettings,
    pub taxonomy: KeywordTaxonomy,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Config = serde_yaml::from_str(yaml)?;
        config.taxonomy = config.taxonomy.normalized();
        Ok(config)
    }

    /// Load `path`, or return defaults when no path is given.
    #[instrument(level = "info", skip_all, fields(path = ?path))]
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_yaml(&yaml).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(sources = config.sources.len(), "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_all_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.batch.max_articles, 30);
        assert_eq!(config.scoring.accept_threshold, 6);
        assert_eq!(config.categories.min_score, 2);
        assert_eq!(config.digest.max_per_category, 5);
    }

    #[test]
    fn test_partial_overrides_keep_other_defaults() {
        let yaml = "scoring:\n  accept_threshold: 8\ndigest:\n  max_per_category: 3\n\
                    taxonomy:\n  expat:\n    - FATCA\n    - Green Card\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.scoring.accept_threshold, 8);
        assert_eq!(config.scoring.vorarlberg_title, 7);
        assert_eq!(config.digest.max_per_category, 3);
        assert_eq!(config.digest.summary_max_chars, 300);
        assert_eq!(config.taxonomy.expat, vec!["fatca", "green card"]);
        assert_eq!(config.taxonomy.healthcare, KeywordTaxonomy::default().healthcare);
    }

    #[test]
    fn test_unknown_source_kind_is_rejected() {
        let yaml = "sources:\n  - kind: carrier_pigeon\n    name: Coo\n    path: x.json\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[tokio::test]
    async fn test_load_without_path_uses_defaults() {
        let config = Config::load(None).await.unwrap();
        assert!(config.sources.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let err = Config::load(Some(Path::new("/nonexistent/vorarlberg_digest.yaml")))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
