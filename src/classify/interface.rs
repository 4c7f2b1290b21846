use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::InitParam;
use crate::error::Result;

/// One ranked prediction for an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub class_id: usize,
    pub label: String,
    pub confidence: f32,
}

/// An image classification pipeline driven one image at a time.
///
/// `deinit` must be safe to call more than once, and `infer_cost_millis`
/// must stay readable after `deinit`.
pub trait Classifier {
    fn init(&mut self, param: &InitParam) -> Result<()>;

    fn process(&mut self, image_path: &Path) -> Result<()>;

    /// Cumulative device-side inference time in milliseconds
    fn infer_cost_millis(&self) -> f64;

    fn deinit(&mut self) -> Result<()>;
}
