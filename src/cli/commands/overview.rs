//! `knope overview`: latest build of every project.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;

use crate::cli::commands::CommandContext;
use crate::cli::output::{
    write_output, CommandOutput, OverviewProgressBar, ReportRenderer, ReportRow, REPORT_HEADERS,
};
use crate::domain::models::BuildRecord;
use crate::services::{OverviewAggregator, ProjectFilter, MATCH_ALL};

#[derive(Args, Debug, Clone)]
pub struct OverviewArgs {
    /// Regex to filter the projects displayed
    #[arg(short, long, default_value = MATCH_ALL)]
    pub filter: String,

    /// Maximum number of projects looked up at once
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Per-project lookup timeout in seconds (0 disables it)
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Default for OverviewArgs {
    fn default() -> Self {
        Self {
            filter: MATCH_ALL.to_string(),
            concurrency: None,
            timeout: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OverviewOutput {
    pub rows: Vec<ReportRow>,
    #[serde(skip)]
    use_colors: bool,
}

impl OverviewOutput {
    pub fn new(records: &[BuildRecord]) -> Self {
        Self {
            rows: records.iter().map(ReportRow::from).collect(),
            use_colors: false,
        }
    }

    #[must_use]
    pub const fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

impl CommandOutput for OverviewOutput {
    fn to_human(&self) -> String {
        if self.rows.is_empty() {
            return "No projects found.".to_string();
        }
        ReportRenderer::with_colors(self.use_colors).render(&REPORT_HEADERS, &self.rows)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.rows.iter().map(ReportRow::to_json).collect())
    }
}

pub async fn execute(args: OverviewArgs, ctx: &CommandContext) -> Result<()> {
    let progress = if ctx.json {
        OverviewProgressBar::hidden()
    } else {
        OverviewProgressBar::new()
    };
    let aggregator = OverviewAggregator::from_config(ctx.service.clone(), &ctx.config.overview)
        .with_progress(Arc::new(progress));
    let use_colors = !ctx.json && ReportRenderer::new().uses_colors();

    let mut buffer = Vec::new();
    display_overview(&aggregator, &args.filter, ctx.json, use_colors, &mut buffer).await?;
    io::stdout().write_all(&buffer)?;
    Ok(())
}

/// Run the overview for projects matching `pattern` and write the report.
///
/// Fails only when the pattern is invalid or the project list cannot be
/// fetched; individual lookup failures show up as `Unknown` rows.
pub async fn display_overview<W: Write + ?Sized>(
    aggregator: &OverviewAggregator,
    pattern: &str,
    json: bool,
    use_colors: bool,
    out: &mut W,
) -> Result<()> {
    let filter = ProjectFilter::new(pattern)?;
    let records = aggregator.run(&filter).await?;

    let output = OverviewOutput::new(&records).with_colors(use_colors);
    write_output(&output, json, out).context("Failed to write overview")
}
