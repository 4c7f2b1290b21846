use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress tracker for displaying progress while a batch is classified
#[derive(Debug, Default)]
pub struct ProgressTracker {}

impl ProgressTracker {
    /// Create a new progress tracker
    pub fn new() -> Self {
        Self {}
    }

    /// Run `operation` on each path in order, stopping at the first error.
    ///
    /// A progress bar is only drawn for batches of more than ten paths.
    pub fn track_path_progress<F, E>(&self, paths: &[PathBuf], mut operation: F) -> Result<(), E>
    where
        F: FnMut(&PathBuf) -> Result<(), E>,
    {
        let progress_bar = if paths.len() > 10 {
            let pb = ProgressBar::new(paths.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images ({eta}) {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            Some(pb)
        } else {
            None
        };

        for (index, path) in paths.iter().enumerate() {
            let current_count = index + 1;

            if let Some(pb) = &progress_bar {
                // Update message occasionally to avoid too many redraws
                if current_count % 10 == 0 || current_count == 1 || current_count == paths.len() {
                    if let Some(file_name) = path.file_name() {
                        pb.set_message(format!("Processing: {}", file_name.to_string_lossy()));
                    }
                }
            }

            if let Err(e) = operation(path) {
                if let Some(pb) = &progress_bar {
                    pb.abandon_with_message("Processing failed");
                }
                return Err(e);
            }

            if let Some(pb) = &progress_bar {
                pb.set_position(current_count as u64);
            }
        }

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Processing complete");
        }

        Ok(())
    }
}
