//! `knope projects`: list every project name.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

use crate::cli::commands::CommandContext;
use crate::cli::output::{write_output, CommandOutput};
use crate::domain::errors::DomainError;
use crate::domain::ports::BuildService;

#[derive(Debug, Serialize)]
pub struct ProjectsOutput {
    pub projects: Vec<String>,
}

impl CommandOutput for ProjectsOutput {
    fn to_human(&self) -> String {
        self.projects.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.projects)
    }
}

pub async fn execute(ctx: &CommandContext) -> Result<()> {
    let mut buffer = Vec::new();
    display_projects(ctx.service.as_ref(), ctx.json, &mut buffer).await?;
    io::stdout().write_all(&buffer)?;
    Ok(())
}

/// Write all project names, sorted, one per line.
pub async fn display_projects<W: Write + ?Sized>(
    service: &dyn BuildService,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let mut projects = service
        .list_projects()
        .await
        .map_err(DomainError::ProjectListFailed)?;
    projects.sort();
    debug!(count = projects.len(), "listed projects");

    write_output(&ProjectsOutput { projects }, json, out).context("Failed to write projects")
}
