// src/cache.rs

use std::{
    collections::{BTreeSet, HashMap},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::dataset::CanonicalDataset;

/// Cache key: the requested years with order and repeats removed.
pub type YearSet = BTreeSet<i32>;

pub fn year_set(years: &[i32]) -> YearSet {
    years.iter().copied().collect()
}

/// Process-lifetime memo of datasets per distinct year set.
///
/// Entries never expire; callers drop them with `invalidate` or `clear`.
/// The first dataset stored for a key wins, so concurrent loads of the same
/// years all end up sharing one `Arc`.
#[derive(Debug, Default)]
pub struct YearSetCache {
    entries: Mutex<HashMap<YearSet, Arc<CanonicalDataset>>>,
}

impl YearSetCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<YearSet, Arc<CanonicalDataset>>> {
        // a panic while holding the lock cannot leave a half-written entry
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, key: &YearSet) -> Option<Arc<CanonicalDataset>> {
        self.lock().get(key).cloned()
    }

    /// Store `dataset` unless the key is already present; returns the cached value.
    pub fn insert(&self, key: YearSet, dataset: CanonicalDataset) -> Arc<CanonicalDataset> {
        self.lock()
            .entry(key)
            .or_insert_with(|| Arc::new(dataset))
            .clone()
    }

    pub fn invalidate(&self, key: &YearSet) -> bool {
        self.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
