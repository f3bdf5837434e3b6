//! Batch configuration file support.
//!
//! Configuration precedence, highest first:
//! 1. Explicit overrides (CLI flags, builder setters)
//! 2. Environment variables (`RESWEEP_MAX_ROUNDS`, `RESWEEP_IGNORE_ERROR`)
//! 3. Local config file (`./.resweeprc`)
//! 4. Global config file (`~/.resweep/config.toml`)
//! 5. Defaults

use crate::batch::error::BatchError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default round budget.
pub const DEFAULT_MAX_ROUNDS: usize = 5;

/// Batch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of rounds, including the first one.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    /// Keep operation return values in the report.
    #[serde(default = "default_true")]
    pub collect_results: bool,

    /// Return what succeeded instead of failing when rounds run out.
    #[serde(default)]
    pub ignore_error: bool,
}

fn default_max_rounds() -> usize {
    DEFAULT_MAX_ROUNDS
}

fn default_true() -> bool {
    true
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            collect_results: true,
            ignore_error: false,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(String),

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Partial configuration as it appears in a file. Unset keys leave the
/// underlying value alone when merged.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigLayer {
    max_rounds: Option<usize>,
    collect_results: Option<bool>,
    ignore_error: Option<bool>,
}

impl BatchConfig {
    /// Set the round budget.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set whether operation return values are kept.
    #[must_use]
    pub fn with_collect_results(mut self, collect_results: bool) -> Self {
        self.collect_results = collect_results;
        self
    }

    /// Set whether exhausted rounds are tolerated.
    #[must_use]
    pub fn with_ignore_error(mut self, ignore_error: bool) -> Self {
        self.ignore_error = ignore_error;
        self
    }

    /// Check that the configuration can drive a batch.
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.max_rounds == 0 {
            return Err(BatchError::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::default();
        config.merge_file(path)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::ReadError(format!("Failed to create directory: {}", e)))?;
        }

        std::fs::write(path, content)
            .map_err(|e| ConfigError::ReadError(format!("Failed to write file: {}", e)))?;

        Ok(())
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(format!("Failed to serialize: {}", e)))
    }

    /// Get default global configuration file path.
    pub fn default_global_path() -> PathBuf {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".resweep")
            .join("config.toml")
    }

    /// Get default local configuration file path.
    pub fn default_local_path() -> PathBuf {
        PathBuf::from(".resweeprc")
    }

    /// Discover and load configuration files and environment overrides.
    ///
    /// Files that are missing are skipped. Files that exist but fail to
    /// parse are reported.
    pub fn discover_and_load() -> ConfigResult<Self> {
        let mut config = Self::default();

        for path in [Self::default_global_path(), Self::default_local_path()] {
            if path.exists() {
                config.merge_file(&path)?;
            }
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Merge the keys present in a TOML file into this configuration.
    pub fn merge_file(&mut self, path: &Path) -> ConfigResult<()> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        let layer: ConfigLayer = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        self.merge_layer(&layer);
        Ok(())
    }

    fn merge_layer(&mut self, layer: &ConfigLayer) {
        if let Some(max_rounds) = layer.max_rounds {
            self.max_rounds = max_rounds;
        }
        if let Some(collect_results) = layer.collect_results {
            self.collect_results = collect_results;
        }
        if let Some(ignore_error) = layer.ignore_error {
            self.ignore_error = ignore_error;
        }
    }

    /// Apply `RESWEEP_*` environment variables on top of this configuration.
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(raw) = lookup("RESWEEP_MAX_ROUNDS") {
            self.max_rounds = raw.trim().parse().map_err(|_| {
                ConfigError::InvalidValue(format!("RESWEEP_MAX_ROUNDS={}", raw))
            })?;
        }
        if let Some(raw) = lookup("RESWEEP_IGNORE_ERROR") {
            self.ignore_error = parse_bool(&raw).ok_or_else(|| {
                ConfigError::InvalidValue(format!("RESWEEP_IGNORE_ERROR={}", raw))
            })?;
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
