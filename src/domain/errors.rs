//! Domain errors for the Knope build overview.

use thiserror::Error;

use crate::domain::ports::BuildServiceError;

/// Run-level failures.
///
/// Per-project lookup failures in the overview never surface here; they are
/// absorbed into `Unknown` report rows.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Unable to list projects")]
    ProjectListFailed(#[source] BuildServiceError),

    #[error("Unable to fetch builds for project {project}")]
    BuildLookupFailed {
        project: String,
        #[source]
        source: BuildServiceError,
    },

    #[error("please specify a project name")]
    MissingProject,

    #[error("Invalid filter pattern '{pattern}': {reason}")]
    InvalidFilter { pattern: String, reason: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
