//! Knope - a command-line overview of AWS CodeBuild
//!
//! Lists projects, lists the builds of a project, and shows the latest build
//! status of every project at a glance.
//!
//! # Architecture
//!
//! The crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the `BuildService` port
//! - **Service Layer** (`services`): filtering, per-project lookup and the
//!   concurrent overview aggregator
//! - **Adapters** (`adapters`): the CodeBuild client and an in-memory mock
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): argument parsing and report rendering

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{Build, BuildRecord, BuildStatus, Config};
pub use domain::ports::{BuildService, BuildServiceError};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{OverviewAggregator, ProjectFilter};
