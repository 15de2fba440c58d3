//! Per-method progress bars for batch sweeps

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static METHOD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("{{prefix:>8}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static TOTAL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Maps: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates one bar per generation method plus an overall bar
pub struct ProgressManager {
    multi_progress: MultiProgress,
    total_bar: Option<ProgressBar>,
    method_bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            total_bar: None,
            method_bars: Vec::new(),
        }
    }

    /// Show the overall bar for `total` maps
    pub fn initialize(&mut self, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(TOTAL_STYLE.clone());
        self.total_bar = Some(self.multi_progress.add(bar));
    }

    /// Add a bar for one method and return its index
    pub fn add_method(&mut self, name: &str, maps: usize) -> usize {
        let bar = ProgressBar::new(maps as u64);
        bar.set_style(METHOD_STYLE.clone());
        bar.set_prefix(name.to_string());
        self.method_bars.push(self.multi_progress.add(bar));
        self.method_bars.len() - 1
    }

    /// Advance a method bar after a map was handled
    pub fn advance(&self, index: usize, message: &str) {
        if let Some(bar) = self.method_bars.get(index) {
            bar.inc(1);
            bar.set_message(message.to_string());
        }
        if let Some(ref total_bar) = self.total_bar {
            total_bar.inc(1);
        }
    }

    /// Mark a method as done
    pub fn finish_method(&self, index: usize) {
        if let Some(bar) = self.method_bars.get(index) {
            bar.finish_with_message("done");
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref total_bar) = self.total_bar {
            total_bar.finish_with_message("All maps generated");
        }
        let _ = self.multi_progress.clear();
    }
}
