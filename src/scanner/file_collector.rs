use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{debug, trace};
use walkdir::WalkDir;

use crate::error::{InferError, Result};

/// Lists the immediate children of an image directory
#[derive(Debug, Default)]
pub struct FileCollector {}

impl FileCollector {
    /// Create a new file collector
    pub fn new() -> Self {
        Self {}
    }

    /// Collect every entry directly inside `input_dir`.
    ///
    /// Entries are returned as `<input_dir>/<name>` in directory-iteration
    /// order. Nothing is filtered by type or extension, and `.`/`..` never
    /// appear. Any failure to open or read the directory yields
    /// [`InferError::DirOpen`] and no partial list.
    pub fn collect_files(&self, input_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let input_dir = input_dir.as_ref();
        debug!("Collecting files from directory: {}", input_dir.display());

        let open_failed = |source: io::Error| InferError::DirOpen {
            path: input_dir.to_path_buf(),
            source,
        };

        // walkdir yields a plain file as its own root, so reject non-directories up front
        let metadata = fs::metadata(input_dir).map_err(open_failed)?;
        if !metadata.is_dir() {
            return Err(open_failed(io::Error::other("not a directory")));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| open_failed(e.into()))?;
            trace!("Found entry: {}", entry.file_name().to_string_lossy());

            // Join on the raw OS string so names that are not UTF-8 survive
            let mut joined = input_dir.as_os_str().to_os_string();
            joined.push("/");
            joined.push(entry.file_name());
            files.push(PathBuf::from(joined));
        }

        debug!("Collected {} files for processing", files.len());
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::status;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_collect_three_files() -> anyhow::Result<()> {
        let dir = tempdir()?;
        for name in ["a", "b", "c"] {
            fs::write(dir.path().join(name), name)?;
        }
        let root = dir.path().to_string_lossy().into_owned();

        let mut files = FileCollector::new().collect_files(dir.path())?;
        assert_eq!(files.len(), 3);
        for file in &files {
            let file = file.to_string_lossy();
            assert!(!file.ends_with("/.") && !file.ends_with("/.."));
        }

        files.sort();
        let expected: Vec<PathBuf> = ["a", "b", "c"]
            .iter()
            .map(|n| PathBuf::from(format!("{}/{}", root, n)))
            .collect();
        assert_eq!(files, expected);
        Ok(())
    }

    #[test]
    fn test_subdirectories_are_listed_not_descended() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("nested"))?;
        fs::write(dir.path().join("nested").join("deep.jpg"), b"x")?;

        let files = FileCollector::new().collect_files(dir.path())?;
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("nested"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_points_at_the_file() -> anyhow::Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir()?;
        let name = OsStr::from_bytes(b"img_\xff.jpg");
        fs::write(dir.path().join(name), b"pixels")?;

        let files = FileCollector::new().collect_files(dir.path())?;
        assert_eq!(files.len(), 1);
        assert!(files[0].exists());
        assert_eq!(files[0].file_name(), Some(name));
        Ok(())
    }

    #[test]
    fn test_trailing_slash_is_kept() -> anyhow::Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.jpg"), b"a")?;
        let root = format!("{}/", dir.path().display());

        let files = FileCollector::new().collect_files(&root)?;
        assert_eq!(files, vec![PathBuf::from(format!("{}/a.jpg", root))]);
        assert!(files[0].exists());
        Ok(())
    }

    #[test]
    fn test_empty_directory() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let files = FileCollector::new().collect_files(dir.path())?;
        assert!(files.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_directory() {
        let err = FileCollector::new()
            .collect_files("/this/path/does/not/exist")
            .unwrap_err();
        assert!(matches!(err, InferError::DirOpen { .. }));
        assert_eq!(err.code(), status::APP_ERR_INTERNAL_ERROR);
    }

    #[test]
    fn test_regular_file_is_not_a_directory() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("image.jpg");
        fs::write(&file, b"jpeg")?;

        let err = FileCollector::new().collect_files(&file).unwrap_err();
        assert!(matches!(err, InferError::DirOpen { .. }));
        Ok(())
    }
}
