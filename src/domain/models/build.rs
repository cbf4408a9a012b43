//! Build domain models: status classification, build details and report rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date/time layout used for every timestamp in the reports (`DD-MM-YYYY hh:mm`).
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Display category of a build.
///
/// `Success`, `Failure`, `InProgress` and `Stale` are derived from the raw
/// status string reported by the build service. `Unknown` and `Empty` are
/// never derived; callers assign them when a lookup failed or a project has
/// no builds at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Success,
    Failure,
    InProgress,
    Stale,
    Unknown,
    Empty,
}

impl BuildStatus {
    /// Classify a raw build status string.
    ///
    /// Total over all inputs: anything not explicitly recognised, including
    /// `SUCCEEDED` and the empty string, is treated as a success.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "FAILED" | "FAULT" => Self::Failure,
            "IN_PROGRESS" => Self::InProgress,
            "STOPPED" | "TIMED_OUT" => Self::Stale,
            _ => Self::Success,
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Failure => "❌",
            Self::InProgress => "🏗",
            Self::Stale => "🕳",
            Self::Unknown => "❓",
            Self::Empty => "🗂",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::InProgress => "in_progress",
            Self::Stale => "stale",
            Self::Unknown => "unknown",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Details of one build as reported by the build service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// Opaque build identifier
    pub id: String,
    /// Raw status string (e.g. `SUCCEEDED`, `IN_PROGRESS`)
    pub status: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    /// Absent while the build is still running
    pub end_time: Option<DateTime<Utc>>,
    /// Source commit or branch the build ran against
    pub resolved_source_version: Option<String>,
}

impl Build {
    pub fn classify(&self) -> BuildStatus {
        BuildStatus::classify(self.status.as_deref().unwrap_or_default())
    }
}

/// One row of the overview report.
///
/// Created once per project per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub project: String,
    pub status: BuildStatus,
    pub branch: Option<String>,
    pub start: Option<String>,
    pub finish: Option<String>,
}

impl BuildRecord {
    /// Record for a project whose lookup could not be completed.
    pub fn unknown(project: impl Into<String>) -> Self {
        Self::sentinel(project, BuildStatus::Unknown)
    }

    /// Record for a project that has no builds yet.
    pub fn empty(project: impl Into<String>) -> Self {
        Self::sentinel(project, BuildStatus::Empty)
    }

    /// Record describing the given build of a project.
    pub fn from_build(project: impl Into<String>, build: &Build) -> Self {
        Self {
            project: project.into(),
            status: build.classify(),
            branch: build.resolved_source_version.clone(),
            start: build.start_time.as_ref().map(format_timestamp),
            finish: build.end_time.as_ref().map(format_timestamp),
        }
    }

    fn sentinel(project: impl Into<String>, status: BuildStatus) -> Self {
        Self {
            project: project.into(),
            status,
            branch: None,
            start: None,
            finish: None,
        }
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(DATE_TIME_FORMAT).to_string()
}
