//! Configuration types for article-gen

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of articles buffered before an automatic flush
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default number of generated articles between progress reports
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Store and generation configuration
///
/// Passed explicitly to the stores and the service; nothing is read from
/// process-wide state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// SQLite connection URL (default: "sqlite:articles.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Articles buffered before an automatic flush (default: 1000)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Generated articles between progress reports (default: 1000)
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,

    /// DDL script for the articles table (built-in schema if None)
    #[serde(default)]
    pub articles_script: Option<PathBuf>,

    /// DDL script for the words table (built-in schema if None)
    #[serde(default)]
    pub words_script: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            batch_size: default_batch_size(),
            progress_interval: default_progress_interval(),
            articles_script: None,
            words_script: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file and validate it
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the stores cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            return Err(Error::Config {
                message: "database_url must not be empty".to_string(),
                key: Some("database_url".to_string()),
            });
        }
        if self.batch_size == 0 {
            return Err(Error::Config {
                message: "batch_size must be at least 1".to_string(),
                key: Some("batch_size".to_string()),
            });
        }
        if self.progress_interval == 0 {
            return Err(Error::Config {
                message: "progress_interval must be at least 1".to_string(),
                key: Some("progress_interval".to_string()),
            });
        }
        Ok(())
    }
}

fn default_database_url() -> String {
    "sqlite:articles.db".to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_progress_interval() -> usize {
    DEFAULT_PROGRESS_INTERVAL
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.progress_interval, 1000);
        assert_eq!(config.database_url, "sqlite:articles.db");
        assert!(config.articles_script.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_fills_missing_fields() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "database_url": "sqlite::memory:", "batch_size": 50 }}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.progress_interval, DEFAULT_PROGRESS_INTERVAL);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = Config {
            batch_size: 0,
            ..Default::default()
        };
        match config.validate() {
            Err(Error::Config { key, .. }) => assert_eq!(key.as_deref(), Some("batch_size")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_url_rejected() {
        let config = Config {
            database_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(Error::Serialization(_))
        ));
    }
}
