//! `knope builds`: every build of one project, newest first.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};
use tracing::debug;

use crate::cli::commands::CommandContext;
use crate::cli::output::{write_output, CommandOutput, ReportRenderer, ReportRow, REPORT_HEADERS};
use crate::domain::errors::DomainError;
use crate::domain::models::Build;
use crate::domain::ports::BuildService;

#[derive(Args, Debug, Clone, Default)]
pub struct BuildsArgs {
    /// Project name
    #[arg(short, long)]
    pub project: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BuildsOutput {
    pub project: String,
    pub rows: Vec<ReportRow>,
    #[serde(skip)]
    use_colors: bool,
}

impl BuildsOutput {
    pub fn new(project: impl Into<String>, builds: &[Build]) -> Self {
        Self {
            project: project.into(),
            rows: builds.iter().map(ReportRow::from).collect(),
            use_colors: false,
        }
    }

    #[must_use]
    pub const fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

impl CommandOutput for BuildsOutput {
    fn to_human(&self) -> String {
        if self.rows.is_empty() {
            return "No builds found.".to_string();
        }
        ReportRenderer::with_colors(self.use_colors).render(&REPORT_HEADERS, &self.rows)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.rows.iter().map(ReportRow::to_json).collect())
    }
}

pub async fn execute(args: BuildsArgs, ctx: &CommandContext) -> Result<()> {
    let mut buffer = Vec::new();
    let use_colors = !ctx.json && ReportRenderer::new().uses_colors();
    display_builds(
        ctx.service.as_ref(),
        args.project.as_deref(),
        ctx.json,
        use_colors,
        &mut buffer,
    )
    .await?;
    io::stdout().write_all(&buffer)?;
    Ok(())
}

/// Write the builds of `project` in the order the service listed their ids.
///
/// Any service failure aborts the whole report.
pub async fn display_builds<W: Write + ?Sized>(
    service: &dyn BuildService,
    project: Option<&str>,
    json: bool,
    use_colors: bool,
    out: &mut W,
) -> Result<()> {
    let project = project
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or(DomainError::MissingProject)?;

    let builds = fetch_builds(service, project).await?;
    debug!(project, count = builds.len(), "fetched builds");

    let output = BuildsOutput::new(project, &builds).with_colors(use_colors);
    write_output(&output, json, out).context("Failed to write builds")
}

/// List build ids for `project` and fetch their details, ordered like the ids.
pub async fn fetch_builds(service: &dyn BuildService, project: &str) -> Result<Vec<Build>, DomainError> {
    let lookup_failed = |source| DomainError::BuildLookupFailed {
        project: project.to_string(),
        source,
    };

    let ids = service
        .list_build_ids_for_project(project)
        .await
        .map_err(lookup_failed)?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builds = service.batch_get_builds(&ids).await.map_err(lookup_failed)?;

    let position: HashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(index, id)| (id.as_str(), index))
        .collect();
    builds.sort_by_key(|build| position.get(build.id.as_str()).copied().unwrap_or(usize::MAX));

    Ok(builds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockBuildService;

    fn build(id: &str, status: &str) -> Build {
        Build {
            id: id.to_string(),
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_builds_keeps_listing_order() {
        let service = MockBuildService::new().with_project(
            "app",
            vec![build("app:3", "IN_PROGRESS"), build("app:2", "FAILED"), build("app:1", "SUCCEEDED")],
        );

        let builds = fetch_builds(&service, "app").await.unwrap();
        let ids: Vec<&str> = builds.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["app:3", "app:2", "app:1"]);
    }

    #[tokio::test]
    async fn test_fetch_builds_empty_project_skips_batch() {
        let service = MockBuildService::new().with_empty_project("app");

        let builds = fetch_builds(&service, "app").await.unwrap();
        assert!(builds.is_empty());
        assert_eq!(service.batch_get_calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_builds_batch_failure_is_fatal() {
        let service = MockBuildService::new()
            .with_project("app", vec![build("app:1", "SUCCEEDED")])
            .with_batch_get_failure("app");

        let err = fetch_builds(&service, "app").await.unwrap_err();
        assert!(matches!(err, DomainError::BuildLookupFailed { ref project, .. } if project == "app"));
    }

    #[tokio::test]
    async fn test_blank_project_is_rejected() {
        let service = MockBuildService::new();
        let mut out = Vec::new();

        let err = display_builds(&service, Some("  "), false, false, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::MissingProject)));
        assert_eq!(service.list_builds_calls(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_builds_human_output() {
        assert_eq!(BuildsOutput::new("app", &[]).to_human(), "No builds found.");
    }
}
