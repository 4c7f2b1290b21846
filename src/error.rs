//! Error types for the inference driver.
//!
//! Every failure carries a numeric status code. The driver propagates that
//! code verbatim as the process exit status, so the table in [`status`] is
//! part of the command-line contract.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Numeric status codes shared by the scanner, the classifier and the binary.
pub mod status {
    pub const APP_ERR_OK: i32 = 0;
    pub const APP_ERR_COMM_FAILURE: i32 = 1;
    pub const APP_ERR_INTERNAL_ERROR: i32 = 2;
    pub const APP_ERR_COMM_INIT_FAIL: i32 = 3;
    pub const APP_ERR_COMM_NO_EXIST: i32 = 9;
    pub const APP_ERR_COMM_OPEN_FAIL: i32 = 11;
    pub const APP_ERR_COMM_READ_FAIL: i32 = 12;
    pub const APP_ERR_COMM_INVALID_PARAM: i32 = 13;
    pub const APP_ERR_INFER_FAIL: i32 = 14;
    pub const APP_ERR_COMM_WRITE_FAIL: i32 = 15;
}

/// Errors raised while scanning, classifying or reporting
#[derive(Error, Debug)]
pub enum InferError {
    /// The image directory could not be opened or listed
    #[error("opendir failed. dir:{}", path.display())]
    DirOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration value is out of range
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// The configuration file could not be read
    #[error("failed to read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for an `InitParam`
    #[error("failed to parse config file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The label file could not be opened
    #[error("failed to open label file {}", path.display())]
    LabelOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The label file does not hold one label per class
    #[error("label file {} has {found} labels, expected {expected}", path.display())]
    LabelCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// The model artifact does not exist
    #[error("model file {} does not exist", .0.display())]
    ModelMissing(PathBuf),

    /// The model artifact exists but could not be read
    #[error("failed to read model file {}", path.display())]
    ModelRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `process` was called on a classifier that is not initialized
    #[error("classifier is not initialized")]
    NotInitialized,

    /// An input image could not be read
    #[error("failed to read image {}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input tensor is empty
    #[error("input tensor for {} is empty", .0.display())]
    EmptyInput(PathBuf),

    /// The inference engine failed or produced an unusable output tensor
    #[error("inference failed: {0}")]
    Infer(String),

    /// A per-image result file could not be written
    #[error("failed to write result file {}: {reason}", path.display())]
    ResultWrite { path: PathBuf, reason: String },

    /// A status code reported by an external collaborator
    #[error("operation failed with status {0}")]
    Status(i32),
}

impl InferError {
    /// The status code this error propagates as
    pub fn code(&self) -> i32 {
        use status::*;

        match self {
            Self::DirOpen { .. } => APP_ERR_INTERNAL_ERROR,
            Self::InvalidParam(_)
            | Self::ConfigParse { .. }
            | Self::LabelCount { .. }
            | Self::EmptyInput(_) => APP_ERR_COMM_INVALID_PARAM,
            Self::ConfigRead { .. } | Self::LabelOpen { .. } => APP_ERR_COMM_OPEN_FAIL,
            Self::ModelMissing(_) => APP_ERR_COMM_NO_EXIST,
            Self::ModelRead { .. } | Self::ImageRead { .. } => APP_ERR_COMM_READ_FAIL,
            Self::NotInitialized => APP_ERR_COMM_INIT_FAIL,
            Self::Infer(_) => APP_ERR_INFER_FAIL,
            Self::ResultWrite { .. } => APP_ERR_COMM_WRITE_FAIL,
            Self::Status(code) => *code,
        }
    }
}

pub type Result<T> = std::result::Result<T, InferError>;
