use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Knope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// AWS client configuration
    #[serde(default)]
    pub aws: AwsConfig,

    /// Overview fan-out configuration
    #[serde(default)]
    pub overview: OverviewConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// AWS client configuration
///
/// Unset values fall through to the SDK's default provider chain
/// (`AWS_REGION`, `AWS_PROFILE`, shared config files).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AwsConfig {
    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub profile: Option<String>,

    /// Override the service endpoint (local emulators)
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Overview fan-out configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OverviewConfig {
    /// Maximum number of project lookups in flight at once (1-256)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-project lookup timeout in seconds, 0 disables the timeout
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
}

const fn default_max_concurrency() -> usize {
    16
}

const fn default_lookup_timeout_secs() -> u64 {
    30
}

impl OverviewConfig {
    pub const fn lookup_timeout(&self) -> Option<Duration> {
        if self.lookup_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.lookup_timeout_secs))
        }
    }
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            lookup_timeout_secs: default_lookup_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: pretty, compact or json
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for JSON log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Log file rotation: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
