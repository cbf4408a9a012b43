//! Common test utilities for integration tests
//!
//! Provides shared build fixtures and helpers used across the command tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use knope::domain::models::Build;

/// 19-07-2019 23:00 UTC
pub const STARTED_AT: i64 = 1_563_577_200;

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
}

/// A finished build that started at [`STARTED_AT`] and ran ten minutes.
pub fn finished_build(status: &str, branch: &str) -> Build {
    Build {
        id: String::new(),
        status: Some(status.to_string()),
        start_time: Some(at(STARTED_AT)),
        end_time: Some(at(STARTED_AT + 600)),
        resolved_source_version: Some(branch.to_string()),
    }
}

/// A build that has started but not finished.
pub fn running_build(branch: &str) -> Build {
    Build {
        id: String::new(),
        status: Some("IN_PROGRESS".to_string()),
        start_time: Some(at(STARTED_AT)),
        end_time: None,
        resolved_source_version: Some(branch.to_string()),
    }
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Non-header lines of a rendered report.
pub fn body_lines(output: &str) -> Vec<String> {
    output.lines().skip(1).map(str::to_string).collect()
}
