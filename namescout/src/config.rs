use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};

/// Configuration for a search.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.namescout.yaml` in the current directory
/// 3. Global `$HOME/.config/namescout/config.yaml`
///
/// Every field has a default, so a missing or empty file is a valid configuration.
///
/// # Configuration Format
///
/// ```yaml
/// # Minimum similarity (0.0 - 1.0) for a file name to be reported
/// threshold: 0.75
///
/// # Extension value meaning "match any extension"
/// extension_wildcard: "*"
///
/// # Matches buffered between the walkers and the consumer
/// channel_capacity: 100
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum similarity score a candidate needs to be reported
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Extension sentinel assigned when the target has no `.`
    #[serde(default = "default_extension_wildcard")]
    pub extension_wildcard: String,

    /// Capacity of the result channel; walkers block when it is full
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

pub const DEFAULT_THRESHOLD: f64 = 0.75;
pub const DEFAULT_EXTENSION_WILDCARD: &str = "*";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_extension_wildcard() -> String {
    DEFAULT_EXTENSION_WILDCARD.to_string()
}

fn default_channel_capacity() -> usize {
    DEFAULT_CHANNEL_CAPACITY
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            extension_wildcard: default_extension_wildcard(),
            channel_capacity: default_channel_capacity(),
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus a specific file
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("namescout/config.yaml")),
            Some(PathBuf::from(".namescout.yaml")),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values describe a usable search
    pub fn validate(&self) -> SearchResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::config_error(format!(
                "threshold must be between 0 and 1, got {}",
                self.threshold
            )));
        }
        if self.channel_capacity == 0 {
            return Err(SearchError::config_error(
                "channel_capacity must be at least 1",
            ));
        }
        if self.extension_wildcard.is_empty() {
            return Err(SearchError::config_error(
                "extension_wildcard must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        config_path
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let config_path = write_config(
            &dir,
            r#"
            threshold: 0.5
            extension_wildcard: "?"
            channel_capacity: 8
            log_level: "debug"
        "#,
        );

        let config = SearchConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.extension_wildcard, "?");
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_default_values() {
        let dir = tempdir().unwrap();
        let config_path = write_config(&dir, "log_level: \"info\"\n");

        let config = SearchConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.extension_wildcard, "*");
        assert_eq!(config.channel_capacity, 100);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_default_impl_matches_serde_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.threshold, 0.75);
        assert_eq!(config.extension_wildcard, "*");
        assert_eq!(config.channel_capacity, 100);
        assert_eq!(config.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempdir().unwrap();
        let config_path = write_config(
            &dir,
            r#"
            threshold: "high"  # Should be a number
            channel_capacity: []  # Should be a number
        "#,
        );

        let result = SearchConfig::load_from(Some(&config_path));
        assert!(matches!(result, Err(SearchError::Config(_))));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let dir = tempdir().unwrap();
        let config_path = write_config(&dir, "threshold: 1.5\n");
        let result = SearchConfig::load_from(Some(&config_path));
        assert!(matches!(result, Err(SearchError::ConfigError(_))));

        let config = SearchConfig {
            channel_capacity: 0,
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SearchConfig {
            extension_wildcard: String::new(),
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = SearchConfig::load_from(Some(Path::new("nonexistent.yaml")));
        assert!(result.is_err());
    }
}
