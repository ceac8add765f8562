//! # Dataset Loader
//!
//! Owns the in-memory course collection for the lifetime of the process.
//!
//! The first `snapshot()` reads the source; every later call returns the same
//! shared slice until `replace_all` swaps in a new one. Readers holding an
//! older snapshot keep a consistent view while a replacement happens.
//!
//! A source that fails to load degrades to an empty collection, which is
//! memoized like any other result.

use std::sync::{Arc, RwLock};

use tracing::{error, info, warn};

use super::errors::CatalogResult;
use super::record::CourseRecord;
use super::source::{assign_ids, CourseSource};

/// Shared, immutable view of the loaded collection
pub type CourseSnapshot = Arc<[CourseRecord]>;

/// Memoizing loader over a `CourseSource`
#[derive(Debug)]
pub struct DatasetLoader {
    source: Arc<dyn CourseSource>,
    cached: RwLock<Option<CourseSnapshot>>,
}

impl DatasetLoader {
    /// Create a loader; nothing is read until the first snapshot.
    pub fn new(source: Arc<dyn CourseSource>) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
        }
    }

    /// Current collection, loading it on first use.
    pub fn snapshot(&self) -> CourseSnapshot {
        if let Some(snapshot) = self.read_cached() {
            return snapshot;
        }

        let mut guard = self.cached.write().unwrap_or_else(|p| p.into_inner());
        // Another request may have loaded while we waited for the lock
        if let Some(snapshot) = guard.as_ref() {
            return snapshot.clone();
        }

        let records = match self.source.load() {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "failed to load course dataset, serving empty collection");
                Vec::new()
            }
        };
        if records.is_empty() {
            warn!("course dataset is empty");
        }

        let snapshot: CourseSnapshot = records.into();
        *guard = Some(snapshot.clone());
        snapshot
    }

    /// Whether the collection has been loaded yet
    pub fn is_loaded(&self) -> bool {
        self.read_cached().is_some()
    }

    /// Replace the whole collection.
    ///
    /// Ids are reassigned when the new records do not carry unique ones.
    /// With `persist` set the source is asked to store the new collection
    /// first; the in-memory swap only happens if that succeeds.
    pub fn replace_all(
        &self,
        records: Vec<CourseRecord>,
        persist: bool,
    ) -> CatalogResult<CourseSnapshot> {
        let records = assign_ids(records);

        if persist && !self.source.persist(&records)? {
            warn!("dataset source is read-only, replacement kept in memory only");
        }

        let snapshot: CourseSnapshot = records.into();
        let mut guard = self.cached.write().unwrap_or_else(|p| p.into_inner());
        *guard = Some(snapshot.clone());

        info!(count = snapshot.len(), "course dataset replaced");
        Ok(snapshot)
    }

    fn read_cached(&self) -> Option<CourseSnapshot> {
        self.cached
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::errors::CatalogError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingSource {
        loads: AtomicUsize,
        fail: bool,
    }

    impl CourseSource for CountingSource {
        fn load(&self) -> CatalogResult<Vec<CourseRecord>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CatalogError::malformed("boom"));
            }
            Ok(assign_ids(vec![CourseRecord::default(); 3]))
        }
    }

    #[test]
    fn test_snapshot_is_memoized() {
        let source = Arc::new(CountingSource::default());
        let loader = DatasetLoader::new(source.clone());

        assert!(!loader.is_loaded());
        let first = loader.snapshot();
        let second = loader.snapshot();

        assert!(loader.is_loaded());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 3);
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_degrades_to_empty_once() {
        let source = Arc::new(CountingSource {
            fail: true,
            ..Default::default()
        });
        let loader = DatasetLoader::new(source.clone());

        assert!(loader.snapshot().is_empty());
        assert!(loader.snapshot().is_empty());
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_replace_all_swaps_snapshot() {
        let loader = DatasetLoader::new(Arc::new(CountingSource::default()));
        let before = loader.snapshot();

        let replacement = vec![CourseRecord {
            foreign_course_title: Some("Replacement".to_string()),
            ..Default::default()
        }];
        loader.replace_all(replacement, false).unwrap();

        let after = loader.snapshot();
        assert_eq!(before.len(), 3);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, Some(1));
        assert_eq!(after[0].foreign_course_title.as_deref(), Some("Replacement"));
    }

    #[test]
    fn test_replace_before_first_load_skips_source() {
        let source = Arc::new(CountingSource::default());
        let loader = DatasetLoader::new(source.clone());

        loader.replace_all(Vec::new(), true).unwrap();

        assert!(loader.snapshot().is_empty());
        assert_eq!(source.loads.load(Ordering::SeqCst), 0);
    }
}
