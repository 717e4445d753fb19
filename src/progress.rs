//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`Progress`] struct which implements
//! [`ProgressCallback`] to show a spinner while the tree is collected and a
//! bar while records are grouped by digest.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Phase name reported while walking and hashing.
pub const PHASE_COLLECTING: &str = "collecting";
/// Phase name reported while grouping records by digest.
pub const PHASE_GROUPING: &str = "grouping";

/// Progress callback for the inventory phases.
///
/// Implement this trait to receive progress updates while a tree is
/// collected and grouped.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase ([`PHASE_COLLECTING`] or [`PHASE_GROUPING`])
    /// * `total` - Total number of items to process, 0 when unknown
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called for each item processed.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item number (1-based)
    /// * `path` - Path being processed
    fn on_progress(&self, current: usize, path: &str);

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// Progress reporter using indicatif.
pub struct Progress {
    active: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing will be displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirinfo::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            active: Mutex::new(None),
            quiet,
        }
    }

    fn collecting_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn grouping_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    fn replace_active(&self, bar: Option<ProgressBar>) {
        if let Ok(mut active) = self.active.lock() {
            if let Some(previous) = active.take() {
                previous.finish_and_clear();
            }
            *active = bar;
        }
    }

    fn with_active(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(active) = self.active.lock() {
            if let Some(ref pb) = *active {
                f(pb);
            }
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }

        let pb = match phase {
            PHASE_COLLECTING => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::collecting_style());
                pb.set_message("Collecting");
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            }
            _ => {
                let pb = ProgressBar::new(total as u64);
                pb.set_style(Self::grouping_style());
                pb.set_message(phase.to_string());
                pb
            }
        };
        self.replace_active(Some(pb));
    }

    fn on_progress(&self, current: usize, path: &str) {
        if self.quiet {
            return;
        }

        self.with_active(|pb| {
            pb.set_position(current as u64);
            pb.set_message(truncate_path(path, 40));
        });
    }

    fn on_phase_end(&self, phase: &str) {
        if self.quiet {
            return;
        }

        if let Ok(mut active) = self.active.lock() {
            if let Some(pb) = active.take() {
                let message = match phase {
                    PHASE_COLLECTING => "Collection complete".to_string(),
                    PHASE_GROUPING => "Grouping complete".to_string(),
                    other => format!("{other} complete"),
                };
                pb.finish_with_message(message);
            }
        }
    }
}

/// Truncate a path for display in the progress bar.
///
/// Keeps the file name when the full path is too long, and the tail of the
/// file name when even that does not fit.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let keep = max_len.saturating_sub(3);
        let tail: String = file_name.chars().skip(name_len.saturating_sub(keep)).collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
