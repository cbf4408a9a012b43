//! Table output for the build reports
//!
//! Renders aligned, borderless tables with comfy-table. Only the status cell
//! is coloured, and only when the terminal supports it.

use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use std::env;

use crate::domain::models::{format_timestamp, Build, BuildRecord, BuildStatus};

/// Column labels shared by the overview and builds reports.
///
/// Five columns: `Started` is shown alongside `Finished`, both as `DD-MM-YYYY hh:mm`.
pub const REPORT_HEADERS: [&str; 5] = ["Status", "Name", "Branch", "Started", "Finished"];

/// One rendered line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub status: BuildStatus,
    pub name: String,
    pub branch: Option<String>,
    pub start: Option<String>,
    pub finish: Option<String>,
}

impl From<&BuildRecord> for ReportRow {
    fn from(record: &BuildRecord) -> Self {
        Self {
            status: record.status,
            name: record.project.clone(),
            branch: record.branch.clone(),
            start: record.start.clone(),
            finish: record.finish.clone(),
        }
    }
}

impl From<&Build> for ReportRow {
    fn from(build: &Build) -> Self {
        Self {
            status: build.classify(),
            name: build.id.clone(),
            branch: build.resolved_source_version.clone(),
            start: build.start_time.as_ref().map(format_timestamp),
            finish: build.end_time.as_ref().map(format_timestamp),
        }
    }
}

impl ReportRow {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.status,
            "icon": self.status.icon(),
            "name": self.name,
            "branch": self.branch,
            "start": self.start,
            "finish": self.finish,
        })
    }
}

/// Formats report rows into an aligned table.
pub struct ReportRenderer {
    /// Whether to use colors in output
    use_colors: bool,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub const fn uses_colors(&self) -> bool {
        self.use_colors
    }

    /// Render rows under the given headers. Absent values become empty cells.
    pub fn render(&self, headers: &[&str], rows: &[ReportRow]) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(headers.iter().copied());

        for row in rows {
            let status = if self.use_colors {
                Cell::new(row.status.icon()).fg(status_color(row.status))
            } else {
                Cell::new(row.status.icon())
            };
            table.add_row(vec![
                status,
                Cell::new(&row.name),
                Cell::new(row.branch.as_deref().unwrap_or_default()),
                Cell::new(row.start.as_deref().unwrap_or_default()),
                Cell::new(row.finish.as_deref().unwrap_or_default()),
            ]);
        }

        table
            .to_string()
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

/// Map build status to color
const fn status_color(status: BuildStatus) -> Color {
    match status {
        BuildStatus::Success => Color::Green,
        BuildStatus::Failure => Color::Red,
        BuildStatus::InProgress => Color::Cyan,
        BuildStatus::Stale => Color::Yellow,
        BuildStatus::Unknown => Color::Magenta,
        BuildStatus::Empty => Color::DarkGrey,
    }
}
