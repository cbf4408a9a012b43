pub mod build;
pub mod config;

pub use build::{format_timestamp, Build, BuildRecord, BuildStatus, DATE_TIME_FORMAT};
pub use config::{AwsConfig, Config, LoggingConfig, OverviewConfig};
