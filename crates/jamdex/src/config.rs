//! `jamdex.yaml` configuration.
//!
//! ```yaml
//! dataset: results/ld55.json   # relative to this file
//! per_page: 20
//! categories: all-records      # or first-record
//! output: auto                 # term, text, json, yaml, csv
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use std::path::{Path, PathBuf};

use jamdex_seeker::{CategorySource, RegistryOptions};
use serde::Deserialize;
use thiserror::Error;

use crate::output::OutputMode;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_FILE: &str = "jamdex.yaml";

/// Results per page unless configured.
pub const DEFAULT_PER_PAGE: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
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

    #[error("invalid config {path}: per_page must be at least 1")]
    PerPage { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dataset file; relative paths are resolved against the config file.
    pub dataset: Option<PathBuf>,
    pub per_page: usize,
    pub categories: CategorySource,
    pub output: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dataset: None,
            per_page: DEFAULT_PER_PAGE,
            categories: CategorySource::default(),
            output: OutputMode::default(),
        }
    }
}

impl Config {
    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text, path)?;

        if let (Some(dataset), Some(dir)) = (&config.dataset, path.parent()) {
            if dataset.is_relative() {
                config.dataset = Some(dir.join(dataset));
            }
        }
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Resolves the config for a run.
    ///
    /// An explicit path must exist. Otherwise `jamdex.yaml` in `dir` is read
    /// if present, and defaults apply if not.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            tracing::trace!("no config file; using defaults");
            Ok(Config::default())
        }
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty document is a valid, empty config.
        if text.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.per_page == 0 {
            return Err(ConfigError::PerPage {
                path: path.to_path_buf(),
            });
        }
        Ok(config)
    }

    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            categories: self.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.per_page, 20);
        assert_eq!(config.categories, CategorySource::AllRecords);
    }

    #[test]
    fn reads_all_keys() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            DEFAULT_FILE,
            "dataset: data/jam.json\nper_page: 5\ncategories: first-record\noutput: csv\n",
        );

        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.dataset, Some(dir.path().join("data/jam.json")));
        assert_eq!(config.per_page, 5);
        assert_eq!(config.categories, CategorySource::FirstRecord);
        assert_eq!(config.output, OutputMode::Csv);
    }

    #[test]
    fn absolute_dataset_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "c.yaml", "dataset: /srv/jam.json\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.dataset, Some(PathBuf::from("/srv/jam.json")));
    }

    #[test]
    fn empty_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "c.yaml", "\n");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(Some(&dir.path().join("nope.yaml")), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let zero = write(dir.path(), "zero.yaml", "per_page: 0\n");
        assert!(matches!(Config::load(&zero), Err(ConfigError::PerPage { .. })));

        let unknown = write(dir.path(), "unknown.yaml", "colour: blue\n");
        assert!(matches!(Config::load(&unknown), Err(ConfigError::Parse { .. })));

        let bad_mode = write(dir.path(), "mode.yaml", "output: xml\n");
        let err = Config::load(&bad_mode).unwrap_err();
        assert!(err.to_string().contains("mode.yaml"));
    }
}
