use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Upper bound for `overview.max_concurrency`
pub const MAX_CONCURRENCY_LIMIT: usize = 256;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_concurrency: {0}. Must be between 1 and {MAX_CONCURRENCY_LIMIT}")]
    InvalidMaxConcurrency(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: pretty, compact, json")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Values given on the command line, applied on top of every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub max_concurrency: Option<usize>,
    pub lookup_timeout_secs: Option<u64>,
    pub verbose: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(region) = &self.region {
            config.aws.region = Some(region.clone());
        }
        if let Some(profile) = &self.profile {
            config.aws.profile = Some(profile.clone());
        }
        if let Some(max_concurrency) = self.max_concurrency {
            config.overview.max_concurrency = max_concurrency;
        }
        if let Some(timeout) = self.lookup_timeout_secs {
            config.overview.lookup_timeout_secs = timeout;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
    }
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. ~/.knope/config.yaml (user config, optional)
    /// 3. The file given with `--config` (must exist)
    /// 4. Environment variables (KNOPE_* prefix, `__` separates nested keys)
    /// 5. Command-line overrides
    pub fn load(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()).into());
            }
        }

        let mut config: Config = Self::figment(Self::default_config_path().as_deref(), explicit)
            .extract()
            .context("Failed to extract configuration from figment")?;

        overrides.apply(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Assemble the figment for the given files without command-line overrides.
    pub fn figment(user_file: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = user_file {
            figment = figment.merge(Yaml::file(path));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed("KNOPE_").split("__"))
    }

    /// `~/.knope/config.yaml`, if a home directory can be determined.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".knope").join("config.yaml"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let concurrency = config.overview.max_concurrency;
        if concurrency == 0 || concurrency > MAX_CONCURRENCY_LIMIT {
            return Err(ConfigError::InvalidMaxConcurrency(concurrency));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["pretty", "compact", "json"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if config.aws.region.as_deref().is_some_and(|r| r.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed(
                "aws.region cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
