use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{InferError, Result};

/// Class names indexed by class id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl LabelMap {
    /// Load a label file, one label per line.
    ///
    /// Blank lines and `#` comments are skipped. Lines in the
    /// `0: 'tench, Tinca tinca',` dictionary style are reduced to the quoted
    /// name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading labels from {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| InferError::LabelOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        let labels = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(clean_label)
            .collect();
        Self { labels }
    }

    /// Load and require exactly `expected` labels
    pub fn load_exact(path: impl AsRef<Path>, expected: usize) -> Result<Self> {
        let path = path.as_ref();
        let map = Self::load(path)?;
        if map.len() != expected {
            return Err(InferError::LabelCount {
                path: PathBuf::from(path),
                expected,
                found: map.len(),
            });
        }
        Ok(map)
    }

    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.labels.get(class_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn clean_label(line: &str) -> String {
    let mut label = line.trim_start_matches('{').trim_end_matches('}').trim();

    // Leading `<id>:` prefix
    if let Some((prefix, rest)) = label.split_once(':') {
        let prefix = prefix.trim();
        if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) {
            label = rest.trim();
        }
    }

    label = label.strip_suffix(',').unwrap_or(label).trim();

    for quote in ['\'', '"'] {
        if label.len() >= 2 && label.starts_with(quote) && label.ends_with(quote) {
            label = &label[1..label.len() - 1];
            break;
        }
    }

    label.to_string()
}
