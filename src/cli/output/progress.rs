//! Progress bar for the overview report
//!
//! Draws to stderr so stdout carries only the report. indicatif hides the
//! bar on its own when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::domain::models::BuildRecord;
use crate::services::OverviewProgress;

const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";
const PROGRESS_CHARS: &str = "█▓▒░ ";

/// Progress bar tracking completed project lookups.
pub struct OverviewProgressBar {
    bar: ProgressBar,
}

impl OverviewProgressBar {
    /// Create a progress bar drawing to stderr
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Create a progress bar that never draws (JSON output, tests)
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(PROGRESS_CHARS);
        bar.set_style(style);
        Self { bar }
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }
}

impl Default for OverviewProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl OverviewProgress for OverviewProgressBar {
    fn started(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message("checking projects");
        if !self.bar.is_hidden() {
            self.bar.enable_steady_tick(Duration::from_millis(100));
        }
    }

    fn record_completed(&self, record: &BuildRecord) {
        self.bar.set_message(record.project.clone());
        self.bar.inc(1);
    }

    fn finished(&self) {
        self.bar.finish_and_clear();
    }
}
