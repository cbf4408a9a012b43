//! Project name filtering for the overview report.

use regex::Regex;

use crate::domain::errors::{DomainError, DomainResult};

/// Pattern that matches every project name.
pub const MATCH_ALL: &str = ".*";

/// Decides which projects are included in a report.
///
/// The pattern is compiled once up front; an invalid pattern fails the whole
/// run instead of silently excluding projects.
///
/// The default filter holds no pattern and accepts every name.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pattern: Option<Regex>,
}

impl ProjectFilter {
    /// Compile a filter from a regular expression.
    ///
    /// Matching is unanchored: `d` matches any name containing a `d`.
    pub fn new(pattern: &str) -> DomainResult<Self> {
        let pattern = Regex::new(pattern).map_err(|err| DomainError::InvalidFilter {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn matches(&self, project: &str) -> bool {
        self.pattern
            .as_ref()
            .map_or(true, |pattern| pattern.is_match(project))
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_ref().map_or(MATCH_ALL, Regex::as_str)
    }
}
