use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::Result;
use super::loader::load_csv;
use super::model::Dataset;

/// Process-wide store of loaded datasets, keyed by canonical source path.
///
/// Entries live until they are explicitly invalidated; the file is never
/// watched for changes. Failed loads are not cached.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first use.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>> {
        let key = cache_key(path);
        if let Some(ds) = self.entries.get(&key) {
            log::debug!("dataset cache hit: {}", key.display());
            return Ok(Arc::clone(ds));
        }

        log::debug!("dataset cache miss: {}", key.display());
        let dataset = Arc::new(load_csv(path)?);
        self.entries.insert(key, Arc::clone(&dataset));
        log::debug!("{} dataset(s) cached", self.len());
        Ok(dataset)
    }

    /// Drop the entry for `path`. Returns whether anything was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(&cache_key(path)).is_some()
    }

    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&cache_key(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonicalise when possible so `./a.csv` and `a.csv` share an entry.
fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
