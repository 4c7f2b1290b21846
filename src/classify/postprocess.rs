//! Score post-processing: normalization, validation and top-K selection.

use std::cmp::Ordering;

use crate::error::{InferError, Result};

/// Numerically stable softmax
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Require one finite score per class
pub fn check_output(scores: &[f32], class_num: usize) -> Result<()> {
    if scores.len() != class_num {
        return Err(InferError::Infer(format!(
            "output tensor has {} elements, expected {}",
            scores.len(),
            class_num
        )));
    }
    if let Some(index) = scores.iter().position(|s| !s.is_finite()) {
        return Err(InferError::Infer(format!("output tensor has a non-finite score at {}", index)));
    }
    Ok(())
}

/// Indices of the `k` highest scores, best first; ties go to the lower index
pub fn top_k(scores: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}
