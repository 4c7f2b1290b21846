use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

use crate::classify::Classifier;
use crate::config::InitParam;
use crate::driver::run_batch;
use crate::error::{status, InferError};
use crate::scanner::scan_images;

/// Classifier double that records every call
#[derive(Debug, Default)]
struct RecordingClassifier {
    /// Status returned from `init`, if it should fail
    init_status: Option<i32>,

    /// 1-indexed image that fails, with its status
    fail_on: Option<(usize, i32)>,

    /// Device time reported per successful image
    cost_per_image: f64,

    /// Host time spent per image
    sleep_per_image: Duration,

    init_calls: usize,
    deinit_calls: usize,
    attempted: Vec<PathBuf>,
    cost: f64,
}

impl Classifier for RecordingClassifier {
    fn init(&mut self, _param: &InitParam) -> crate::error::Result<()> {
        self.init_calls += 1;
        match self.init_status {
            Some(code) => Err(InferError::Status(code)),
            None => Ok(()),
        }
    }

    fn process(&mut self, image_path: &Path) -> crate::error::Result<()> {
        self.attempted.push(image_path.to_path_buf());
        if let Some((index, code)) = self.fail_on {
            if self.attempted.len() == index {
                return Err(InferError::Status(code));
            }
        }
        thread::sleep(self.sleep_per_image);
        self.cost += self.cost_per_image;
        Ok(())
    }

    fn infer_cost_millis(&self) -> f64 {
        self.cost
    }

    fn deinit(&mut self) -> crate::error::Result<()> {
        self.deinit_calls += 1;
        Ok(())
    }
}

// Helper function to create an image directory with the given file names
fn create_image_dir(names: &[&str]) -> Result<TempDir> {
    let dir = tempdir()?;
    for name in names {
        fs::write(dir.path().join(name), name.as_bytes())?;
    }
    Ok(dir)
}

#[test]
fn test_processes_every_file_in_scan_order() -> Result<()> {
    let dir = create_image_dir(&["a.jpg", "b.jpg", "c.jpg", "d.jpg"])?;
    let mut classifier = RecordingClassifier { cost_per_image: 10.0, ..Default::default() };

    let report = run_batch(&mut classifier, &InitParam::default(), dir.path())?;

    assert_eq!(classifier.attempted, scan_images(dir.path())?);
    assert_eq!(report.processed, 4);
    assert_eq!(classifier.init_calls, 1);
    assert_eq!(classifier.deinit_calls, 1);
    Ok(())
}

#[test]
fn test_stops_at_first_failure() -> Result<()> {
    let dir = create_image_dir(&["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"])?;
    let scanned = scan_images(dir.path())?;
    let mut classifier = RecordingClassifier { fail_on: Some((3, 77)), ..Default::default() };

    let err = run_batch(&mut classifier, &InitParam::default(), dir.path()).unwrap_err();

    assert_eq!(err.code(), 77);
    assert_eq!(classifier.attempted, scanned[..3].to_vec());
    assert_eq!(classifier.deinit_calls, 1);
    Ok(())
}

#[test]
fn test_init_failure_skips_everything() -> Result<()> {
    let dir = create_image_dir(&["a.jpg"])?;
    let mut classifier = RecordingClassifier { init_status: Some(5), ..Default::default() };

    let err = run_batch(&mut classifier, &InitParam::default(), dir.path()).unwrap_err();

    assert_eq!(err.code(), 5);
    assert!(classifier.attempted.is_empty());
    assert_eq!(classifier.deinit_calls, 0);
    Ok(())
}

#[test]
fn test_scan_failure_releases_classifier() {
    let mut classifier = RecordingClassifier::default();

    let err = run_batch(&mut classifier, &InitParam::default(), Path::new("/no/such/image/dir")).unwrap_err();

    assert_eq!(err.code(), status::APP_ERR_INTERNAL_ERROR);
    assert!(classifier.attempted.is_empty());
    assert_eq!(classifier.deinit_calls, 1);
}

#[test]
fn test_empty_directory_is_not_an_error() -> Result<()> {
    let dir = create_image_dir(&[])?;
    let mut classifier = RecordingClassifier::default();

    let report = run_batch(&mut classifier, &InitParam::default(), dir.path())?;

    assert_eq!(report.processed, 0);
    assert_eq!(report.fps, 0.0);
    assert_eq!(classifier.deinit_calls, 1);
    Ok(())
}

#[test]
fn test_fps_uses_device_time_not_wall_clock() -> Result<()> {
    let dir = create_image_dir(&["a.jpg", "b.jpg", "c.jpg"])?;
    let mut classifier = RecordingClassifier {
        cost_per_image: 100.0,
        sleep_per_image: Duration::from_millis(5),
        ..Default::default()
    };

    let report = run_batch(&mut classifier, &InitParam::default(), dir.path())?;

    assert_eq!(report.device_millis, 300.0);
    assert_eq!(report.fps, 10.0);
    assert!(report.wall_millis >= 15.0);
    assert!(report.wall_millis < report.device_millis);
    Ok(())
}
