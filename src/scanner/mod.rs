mod file_collector;
mod progress;

use std::path::{Path, PathBuf};

use crate::error::Result;

// Re-export from submodules
pub use file_collector::FileCollector;
pub use progress::ProgressTracker;

/// List the images directly inside `path`, in directory order
pub fn scan_images(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    FileCollector::new().collect_files(path)
}
