//! CLI output formatting module
//!
//! Reports are written either as aligned tables or as JSON.

pub mod progress;
pub mod table;

use serde::Serialize;
use std::io::{self, Write};

pub use progress::OverviewProgressBar;
pub use table::{ReportRenderer, ReportRow, REPORT_HEADERS};

/// Trait for types that can be rendered as human-readable or JSON output.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

/// Dispatch output based on JSON mode flag.
pub fn write_output<T: CommandOutput, W: Write + ?Sized>(
    result: &T,
    json_mode: bool,
    out: &mut W,
) -> io::Result<()> {
    if json_mode {
        let rendered = serde_json::to_string_pretty(&result.to_json())?;
        writeln!(out, "{rendered}")
    } else {
        let human = result.to_human();
        if human.is_empty() {
            return Ok(());
        }
        writeln!(out, "{human}")
    }
}
