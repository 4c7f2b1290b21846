use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{InferError, Result};

pub const CLASS_NUM: u32 = 1000;
pub const DEFAULT_TOP_K: u32 = 5;
pub const DEFAULT_LABEL_PATH: &str = "../data/config/imagenet1000_clsidx_to_labels.names";
pub const DEFAULT_MODEL_PATH: &str = "../data/models/tinydarknet.om";

/// Parameters handed to a classifier at initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitParam {
    /// Accelerator device the model is loaded on
    pub device_id: u32,

    /// Number of classes the model scores
    pub class_num: u32,

    /// Path to the label names file, one label per class
    pub label_path: PathBuf,

    /// Number of highest-scoring classes kept per image
    pub top_k: u32,

    /// Whether to normalize scores with softmax before ranking
    pub softmax: bool,

    /// Whether to validate input and output tensors
    pub check_tensor: bool,

    /// Path to the model artifact
    pub model_path: PathBuf,

    /// Directory for per-image result files; none are written when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_dir: Option<PathBuf>,
}

impl Default for InitParam {
    fn default() -> Self {
        Self {
            device_id: 0,
            class_num: CLASS_NUM,
            label_path: PathBuf::from(DEFAULT_LABEL_PATH),
            top_k: DEFAULT_TOP_K,
            softmax: false,
            check_tensor: true,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            result_dir: None,
        }
    }
}

impl InitParam {
    /// Load parameters from a TOML file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading init parameters from {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| InferError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| InferError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that the numeric fields are usable together
    pub fn validate(&self) -> Result<()> {
        if self.class_num == 0 {
            return Err(InferError::InvalidParam("class_num must be positive".to_string()));
        }
        if self.top_k == 0 || self.top_k > self.class_num {
            return Err(InferError::InvalidParam(format!(
                "top_k must be within 1..={}, got {}",
                self.class_num, self.top_k
            )));
        }
        Ok(())
    }
}
