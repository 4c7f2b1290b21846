pub mod engine;
pub mod interface;
pub mod labels;
pub mod postprocess;
pub mod tinydarknet;

// Re-export the main API for easier access
pub use engine::{DigestEngine, InferenceEngine};
pub use interface::{Classification, Classifier};
pub use labels::LabelMap;
pub use tinydarknet::TinydarknetClassify;
