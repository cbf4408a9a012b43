//! AWS CodeBuild adapter.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_codebuild::error::DisplayErrorContext;
use aws_sdk_codebuild::primitives::DateTime as AwsDateTime;
use aws_sdk_codebuild::types::{Build as AwsBuild, ProjectSortByType, SortOrderType};
use aws_sdk_codebuild::Client;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::models::{AwsConfig, Build};
use crate::domain::ports::{BuildService, BuildServiceError};

/// Build service backed by AWS CodeBuild.
///
/// Each operation issues a single request; results beyond the first page
/// returned by the service are not fetched.
#[derive(Debug, Clone)]
pub struct CodeBuildService {
    client: Client,
}

impl CodeBuildService {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a client from explicit configuration, falling back to the SDK's
    /// default provider chain for anything left unset.
    pub async fn from_config(config: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        debug!(region = ?sdk_config.region(), "codebuild client configured");
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl BuildService for CodeBuildService {
    async fn list_projects(&self) -> Result<Vec<String>, BuildServiceError> {
        debug!("listing projects");
        let output = self
            .client
            .list_projects()
            .sort_by(ProjectSortByType::Name)
            .sort_order(SortOrderType::Ascending)
            .send()
            .await
            .map_err(|err| BuildServiceError::ListProjects(DisplayErrorContext(&err).to_string()))?;

        Ok(output.projects.unwrap_or_default())
    }

    async fn list_build_ids_for_project(
        &self,
        project: &str,
    ) -> Result<Vec<String>, BuildServiceError> {
        let output = self
            .client
            .list_builds_for_project()
            .project_name(project)
            .sort_order(SortOrderType::Descending)
            .send()
            .await
            .map_err(|err| BuildServiceError::ListBuilds {
                project: project.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            })?;

        Ok(output.ids.unwrap_or_default())
    }

    async fn batch_get_builds(&self, ids: &[String]) -> Result<Vec<Build>, BuildServiceError> {
        let output = self
            .client
            .batch_get_builds()
            .set_ids(Some(ids.to_vec()))
            .send()
            .await
            .map_err(|err| BuildServiceError::BatchGetBuilds(DisplayErrorContext(&err).to_string()))?;

        if let Some(missing) = output.builds_not_found.as_deref().filter(|m| !m.is_empty()) {
            debug!(?missing, "builds not found");
        }

        Ok(output
            .builds
            .unwrap_or_default()
            .into_iter()
            .map(build_from_sdk)
            .collect())
    }
}

fn build_from_sdk(build: AwsBuild) -> Build {
    Build {
        id: build.id.unwrap_or_default(),
        status: build.build_status.map(|status| status.as_str().to_string()),
        start_time: build.start_time.as_ref().and_then(to_utc),
        end_time: build.end_time.as_ref().and_then(to_utc),
        resolved_source_version: build.resolved_source_version,
    }
}

fn to_utc(at: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(at.secs(), at.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_codebuild::types::StatusType;

    #[test]
    fn test_build_from_sdk() {
        let sdk_build = AwsBuild::builder()
            .id("project-one:abc")
            .build_status(StatusType::Failed)
            .start_time(AwsDateTime::from_secs(1_563_577_200))
            .resolved_source_version("my-branch")
            .build();

        let build = build_from_sdk(sdk_build);
        assert_eq!(build.id, "project-one:abc");
        assert_eq!(build.status.as_deref(), Some("FAILED"));
        assert_eq!(
            build.start_time.map(|t| crate::domain::models::format_timestamp(&t)),
            Some("19-07-2019 23:00".to_string())
        );
        assert!(build.end_time.is_none());
        assert_eq!(build.resolved_source_version.as_deref(), Some("my-branch"));
    }

    #[test]
    fn test_build_from_empty_sdk_build() {
        let build = build_from_sdk(AwsBuild::builder().build());
        assert_eq!(build, Build::default());
    }
}
