mod guard;

use std::path::Path;
use std::time::Instant;

use log::{error, info, warn};

use crate::classify::Classifier;
use crate::config::InitParam;
use crate::error::Result;
use crate::scanner::{scan_images, ProgressTracker};

pub use guard::ClassifierGuard;

const THOUSAND: f64 = 1000.0;

/// Outcome of a fully processed batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Number of images classified
    pub processed: usize,

    /// Wall-clock time spent in the classification loop
    pub wall_millis: f64,

    /// Device-side inference time reported by the classifier
    pub device_millis: f64,

    /// Images per second of device time
    pub fps: f64,
}

/// Throughput over device time, `1000 * processed / device_millis`.
///
/// An empty batch reports `0.0`. Processed images with no recorded device
/// time report infinity, as the plain division does.
pub fn compute_fps(processed: usize, device_millis: f64) -> f64 {
    if processed == 0 {
        return 0.0;
    }
    THOUSAND * processed as f64 / device_millis
}

/// Classify every entry of `image_dir` in scan order.
///
/// The classifier is initialized with `param` and, once that succeeds,
/// deinitialized exactly once on every return path. The first failing image
/// aborts the batch and its error is returned unchanged.
pub fn run_batch<C: Classifier>(
    classifier: &mut C,
    param: &InitParam,
    image_dir: &Path,
) -> Result<BatchReport> {
    if let Err(e) = classifier.init(param) {
        error!("TinydarknetClassify init failed, ret={}. {}", e.code(), e);
        return Err(e);
    }
    let mut guard = ClassifierGuard::new(&mut *classifier);

    let files = scan_images(image_dir).inspect_err(|e| error!("{}", e))?;
    info!("Found {} images in {}", files.len(), image_dir.display());

    let start = Instant::now();
    ProgressTracker::new()
        .track_path_progress(&files, |file| guard.process(file))
        .inspect_err(|e| error!("TinydarknetClassify process failed, ret={}. {}", e.code(), e))?;
    let wall_millis = start.elapsed().as_secs_f64() * THOUSAND;

    if let Err(e) = guard.release() {
        warn!("TinydarknetClassify deinit failed, ret={}. {}", e.code(), e);
    }

    let device_millis = classifier.infer_cost_millis();
    let fps = compute_fps(files.len(), device_millis);
    info!("[Process Delay] cost: {} ms\tfps: {} imgs/sec", wall_millis, fps);

    Ok(BatchReport {
        processed: files.len(),
        wall_millis,
        device_millis,
        fps,
    })
}
