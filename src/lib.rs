pub mod classify;
pub mod config;
pub mod driver;
pub mod error;
pub mod scanner;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main types and functions for easier access
pub use classify::{Classification, Classifier, DigestEngine, InferenceEngine, TinydarknetClassify};
pub use config::InitParam;
pub use driver::{run_batch, BatchReport, ClassifierGuard};
pub use error::{InferError, status};
pub use scanner::scan_images;

// Re-export utility functions
pub use utils::file_utils;
