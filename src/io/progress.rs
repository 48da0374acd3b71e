//! Terminal progress display for the placement search
//!
//! Tracks completed first-cell branches and the running raw solution count.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

use crate::algorithm::search::{SearchMonitor, SearchStats};
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_TICK_MS};

static BRANCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Branches: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the search's first-cell branches
///
/// Safe to update from several worker threads.
pub struct SearchProgress {
    bar: ProgressBar,
}

impl Default for SearchProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchProgress {
    /// Create a progress display; it stays hidden until the search starts
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(BRANCH_STYLE.clone());
        Self { bar }
    }

    /// Create a display that never draws, for quiet runs and tests
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Branches completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total branches announced by the search
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Whether the search has reported completion
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl SearchMonitor for SearchProgress {
    fn search_started(&self, total_branches: usize) {
        self.bar.set_length(total_branches as u64);
        self.bar.set_position(0);
        self.bar.set_message("0 raw solutions");
        self.bar
            .enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
    }

    fn branch_finished(&self, raw_solutions: usize) {
        self.bar.inc(1);
        self.bar.set_message(format!("{raw_solutions} raw solutions"));
    }

    fn search_finished(&self, stats: &SearchStats) {
        self.bar.finish_with_message(format!(
            "{} raw solutions",
            stats.raw_solutions
        ));
    }
}
