//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file loading (user file and `--config`)
//! - Environment variable overrides
//! - Command-line overrides
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, ConfigOverrides, MAX_CONCURRENCY_LIMIT};
