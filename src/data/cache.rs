use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::DataError;
use super::loader::load_file;
use super::model::ProductDataset;

// ---------------------------------------------------------------------------
// Dataset cache
// ---------------------------------------------------------------------------

/// Memoizes loaded datasets for the lifetime of the application.
///
/// Each source path is read at most once; later requests for the same path
/// share the first result. Entries are never evicted.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<ProductDataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset for `path`, reading the file only on first access.
    /// Failed loads are not cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<ProductDataset>, DataError> {
        if let Some(dataset) = self.entries.get(path) {
            log::debug!("Dataset cache hit for {}", path.display());
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(load_file(path)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&dataset));
        log::debug!("Dataset cache now holds {} source(s)", self.len());
        Ok(dataset)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(
            &path,
            "product_title,country,product_price,product_star_rating,product_num_ratings\n\
             Cable,US,9.99,4.6,\"1,000\"\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn second_load_does_not_touch_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "items.csv");
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn sources_are_cached_independently() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_csv(&dir, "a.csv");
        let b = write_csv(&dir, "b.csv");
        let mut cache = DatasetCache::new();

        let da = cache.get_or_load(&a).unwrap();
        let db = cache.get_or_load(&b).unwrap();

        assert!(!Arc::ptr_eq(&da, &db));
        assert_eq!(*da, *db);
        assert!(cache.contains(&a) && cache.contains(&b));
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let mut cache = DatasetCache::new();

        assert!(cache.get_or_load(&path).is_err());
        assert!(cache.is_empty());

        write_csv(&dir, "late.csv");
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);
    }
}
