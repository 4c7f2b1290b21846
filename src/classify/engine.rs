use log::{debug, info};

use crate::error::{InferError, Result};
use crate::utils::hash_utils;

/// The device seam: turns an input tensor into one score per class
pub trait InferenceEngine {
    /// Load a model on `device_id`
    fn load(&mut self, model: &[u8], device_id: u32, class_num: usize) -> Result<()>;

    fn execute(&mut self, input: &[u8]) -> Result<Vec<f32>>;

    fn unload(&mut self) -> Result<()>;
}

/// Host-side engine producing deterministic scores from content digests.
///
/// Scores are derived from `SHA-256(model digest || input || block)`, two
/// bytes per class, mapped into `[-8, 8)`. The same model and image always
/// rank the same classes.
#[derive(Debug, Default)]
pub struct DigestEngine {
    model_digest: Option<[u8; 32]>,
    class_num: usize,
}

impl DigestEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InferenceEngine for DigestEngine {
    fn load(&mut self, model: &[u8], device_id: u32, class_num: usize) -> Result<()> {
        let digest = hash_utils::digest_bytes(model);
        info!(
            "Loaded model on device {} ({} bytes, sha256 {})",
            device_id,
            model.len(),
            hash_utils::to_hex(&digest)
        );
        self.model_digest = Some(digest);
        self.class_num = class_num;
        Ok(())
    }

    fn execute(&mut self, input: &[u8]) -> Result<Vec<f32>> {
        let seed = self
            .model_digest
            .ok_or_else(|| InferError::Infer("no model loaded".to_string()))?;

        let stream = hash_utils::expand(&seed, input, self.class_num * 2);
        let scores = stream
            .chunks_exact(2)
            .map(|pair| {
                let raw = u16::from_le_bytes([pair[0], pair[1]]);
                raw as f32 / 4096.0 - 8.0
            })
            .collect();
        Ok(scores)
    }

    fn unload(&mut self) -> Result<()> {
        if self.model_digest.take().is_some() {
            debug!("Model unloaded");
        }
        Ok(())
    }
}
