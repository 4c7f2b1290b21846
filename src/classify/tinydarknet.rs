use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::Serialize;

use crate::classify::engine::{DigestEngine, InferenceEngine};
use crate::classify::interface::{Classification, Classifier};
use crate::classify::labels::LabelMap;
use crate::classify::postprocess;
use crate::config::InitParam;
use crate::error::{InferError, Result};
use crate::utils::file_utils;

/// State that only exists between `init` and `deinit`
#[derive(Debug)]
struct Session {
    param: InitParam,
    labels: LabelMap,
}

/// Per-image result file contents
#[derive(Debug, Serialize)]
struct ImageResult<'a> {
    image: &'a Path,
    top_k: &'a [Classification],
}

/// Tiny-DarkNet classification pipeline over an [`InferenceEngine`].
///
/// Reads each image, runs the engine, validates and ranks the scores, maps
/// them to label names and optionally writes a result file per image. Only
/// the engine's execution time counts toward [`Classifier::infer_cost_millis`].
#[derive(Debug)]
pub struct TinydarknetClassify<E = DigestEngine> {
    engine: E,
    session: Option<Session>,
    infer_cost: Duration,
    last_result: Vec<Classification>,
}

impl TinydarknetClassify<DigestEngine> {
    pub fn new() -> Self {
        Self::with_engine(DigestEngine::new())
    }
}

impl Default for TinydarknetClassify<DigestEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: InferenceEngine> TinydarknetClassify<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            session: None,
            infer_cost: Duration::ZERO,
            last_result: Vec::new(),
        }
    }

    /// Top-K predictions for the most recently processed image
    pub fn last_result(&self) -> &[Classification] {
        &self.last_result
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    fn load_model(&mut self, param: &InitParam) -> Result<()> {
        let path = &param.model_path;
        if !path.exists() {
            return Err(InferError::ModelMissing(path.clone()));
        }
        let model = fs::read(path).map_err(|source| InferError::ModelRead {
            path: path.clone(),
            source,
        })?;
        self.engine.load(&model, param.device_id, param.class_num as usize)
    }

    fn save_result(result_dir: &Path, image_path: &Path, top_k: &[Classification]) -> Result<()> {
        let path = file_utils::result_file_path(result_dir, image_path);
        let write_failed = |reason: String| InferError::ResultWrite { path: path.clone(), reason };

        let content = serde_json::to_string_pretty(&ImageResult { image: image_path, top_k })
            .map_err(|e| write_failed(e.to_string()))?;
        file_utils::write_string_to_file(&path, &content).map_err(|e| write_failed(format!("{:#}", e)))?;

        debug!("Saved result to {}", path.display());
        Ok(())
    }
}

impl<E: InferenceEngine> Classifier for TinydarknetClassify<E> {
    fn init(&mut self, param: &InitParam) -> Result<()> {
        param.validate()?;

        let labels = LabelMap::load_exact(&param.label_path, param.class_num as usize)?;
        self.load_model(param)?;

        if let Some(dir) = &param.result_dir {
            file_utils::ensure_dir_exists(dir).map_err(|e| InferError::ResultWrite {
                path: dir.clone(),
                reason: format!("{:#}", e),
            })?;
        }

        info!(
            "TinydarknetClassify initialized: {} classes, top {}, softmax {}, check tensor {}",
            param.class_num, param.top_k, param.softmax, param.check_tensor
        );
        self.session = Some(Session { param: param.clone(), labels });
        self.infer_cost = Duration::ZERO;
        Ok(())
    }

    fn process(&mut self, image_path: &Path) -> Result<()> {
        let session = self.session.as_ref().ok_or(InferError::NotInitialized)?;
        let param = &session.param;

        let input = fs::read(image_path).map_err(|source| InferError::ImageRead {
            path: image_path.to_path_buf(),
            source,
        })?;
        if param.check_tensor && input.is_empty() {
            return Err(InferError::EmptyInput(image_path.to_path_buf()));
        }

        let start = Instant::now();
        let scores = self.engine.execute(&input)?;
        self.infer_cost += start.elapsed();

        if param.check_tensor {
            postprocess::check_output(&scores, param.class_num as usize)?;
        }
        let scores = if param.softmax { postprocess::softmax(&scores) } else { scores };

        let top_k: Vec<Classification> = postprocess::top_k(&scores, param.top_k as usize)
            .into_iter()
            .map(|(class_id, confidence)| Classification {
                class_id,
                label: session.labels.get(class_id).unwrap_or_default().to_string(),
                confidence,
            })
            .collect();

        if let Some(best) = top_k.first() {
            info!(
                "image: {}, top1 class: {} [{}], confidence: {:.4}",
                image_path.display(),
                best.class_id,
                best.label,
                best.confidence
            );
        }

        if let Some(dir) = &param.result_dir {
            Self::save_result(dir, image_path, &top_k)?;
        }

        self.last_result = top_k;
        Ok(())
    }

    fn infer_cost_millis(&self) -> f64 {
        self.infer_cost.as_secs_f64() * 1000.0
    }

    fn deinit(&mut self) -> Result<()> {
        if self.session.take().is_some() {
            self.engine.unload()?;
            info!("TinydarknetClassify deinitialized");
        }
        Ok(())
    }
}
