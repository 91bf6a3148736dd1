//! Progress display for download batches
//!
//! A single indicatif bar counts finished files. Quiet mode and empty batches
//! get a hidden bar so callers can tick it unconditionally.

use indicatif::{ProgressBar, ProgressStyle};

use crate::errors::{AppError, Result};

/// Bar template: elapsed, bar, files done, ETA, current file
const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Tracks files finished in a download batch
#[derive(Debug)]
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    /// Creates a bar over `total_files`
    pub fn new(total_files: usize, quiet: bool) -> Result<Self> {
        if quiet || total_files == 0 {
            return Ok(Self {
                bar: ProgressBar::hidden(),
            });
        }

        let bar = ProgressBar::new(total_files as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .map_err(|e| AppError::generic(format!("Progress bar template error: {}", e)))?
                .progress_chars("##-"),
        );
        bar.set_message("Downloading NCEP files");
        Ok(Self { bar })
    }

    /// Marks one file as finished
    pub fn file_done(&self, file_name: &str) {
        self.bar.set_message(file_name.to_string());
        self.bar.inc(1);
    }

    /// Files marked so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clears the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
