//! Tracker configuration
//!
//! Loads options from `refwatch.yaml` and applies per-run overrides carried
//! by reactive triggers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::validation;
use crate::{Error, Result};

/// The config file name
pub const CONFIG_FILE_NAME: &str = "refwatch.yaml";

/// Default time between periodic checks
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(12 * 60 * 60);

/// Options for one tracked repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    /// Remote repository URL
    #[serde(default)]
    pub repository: String,
    /// Local mirror location
    #[serde(default)]
    pub path: PathBuf,
    /// Time between periodic checks
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
}

fn default_interval() -> Duration {
    DEFAULT_INTERVAL
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            repository: String::new(),
            path: PathBuf::new(),
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Per-run replacement values delivered by an upstream trigger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overrides {
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl TrackerConfig {
    pub fn new(repository: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
            path: path.into(),
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Load configuration from a YAML file.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if the file exists and parses
    /// - `Ok(None)` if the file does not exist
    /// - `Err(...)` if the file exists but cannot be read or parsed
    pub fn load(file: &Path) -> Result<Option<Self>> {
        if !file.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(file).map_err(|source| Error::ConfigReadError {
            path: file.to_path_buf(),
            source,
        })?;

        let config: TrackerConfig = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Return a copy with the trigger's overrides applied
    pub fn with_overrides(&self, overrides: &Overrides) -> Self {
        let mut config = self.clone();
        if let Some(repository) = &overrides.repository {
            config.repository = repository.clone();
        }
        if let Some(path) = &overrides.path {
            config.path = path.clone();
        }
        config
    }

    /// Check the required options. Called before any run starts.
    pub fn validate(&self) -> Result<()> {
        validation::validate_repository(&self.repository)?;
        validation::validate_mirror_path(&self.path)?;
        validation::validate_interval(self.interval)?;
        Ok(())
    }
}
