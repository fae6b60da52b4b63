//! Dataset cache – memoizes loaded CSV files by path.
//!
//! A file is read from disk at most once per key until its entry is
//! invalidated. Failed loads are never cached, so fixing the file on disk and
//! retrying works without a restart.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::DataError;
use super::loader::load_csv;
use super::model::Dataset;

/// Cache key: the file path plus the column parsed as time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    path: PathBuf,
    time_column: String,
}

/// Keyed store of loaded datasets.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<CacheKey, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first use.
    pub fn get_or_load(&mut self, path: &Path, time_column: &str) -> Result<Arc<Dataset>, DataError> {
        self.get_or_insert_with(path, time_column, || load_csv(path, time_column))
    }

    fn get_or_insert_with<F>(
        &mut self,
        path: &Path,
        time_column: &str,
        load: F,
    ) -> Result<Arc<Dataset>, DataError>
    where
        F: FnOnce() -> Result<Dataset, DataError>,
    {
        let key = CacheKey {
            path: path.to_path_buf(),
            time_column: time_column.to_string(),
        };
        if let Some(ds) = self.entries.get(&key) {
            log::debug!("Cache hit for {}", path.display());
            return Ok(Arc::clone(ds));
        }

        let ds = Arc::new(load()?);
        self.entries.insert(key, Arc::clone(&ds));
        Ok(ds)
    }

    /// Drop every entry for `path`. Returns whether anything was removed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.path != path);
        let removed = before != self.entries.len();
        if removed {
            log::info!("Invalidated cached dataset for {}", path.display());
        }
        removed
    }

    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.keys().any(|key| key.path == path)
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
