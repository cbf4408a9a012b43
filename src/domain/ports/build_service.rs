use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::Build;

/// Failure of a single remote call to the build service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildServiceError {
    #[error("failed to list projects: {0}")]
    ListProjects(String),

    #[error("failed to list builds for project {project}: {message}")]
    ListBuilds { project: String, message: String },

    #[error("failed to get build details: {0}")]
    BatchGetBuilds(String),
}

/// Build service operations consumed by the reports.
///
/// Implementations must be safe for concurrent use: the overview issues many
/// requests in parallel through one shared instance.
///
/// # Ordering
/// `list_build_ids_for_project` is expected to return identifiers newest
/// first. The overview treats the identifier at index 0 as the most recent
/// build and relies on the service for that ordering.
#[async_trait]
pub trait BuildService: Send + Sync {
    /// List every project visible to the caller, ascending by name where the
    /// service supports it.
    async fn list_projects(&self) -> Result<Vec<String>, BuildServiceError>;

    /// List build identifiers for one project, most recent first.
    async fn list_build_ids_for_project(
        &self,
        project: &str,
    ) -> Result<Vec<String>, BuildServiceError>;

    /// Fetch full details for a batch of build identifiers.
    async fn batch_get_builds(&self, ids: &[String]) -> Result<Vec<Build>, BuildServiceError>;
}
