//! Per-prefix detail shards, read on demand with an optional LRU cache.

use std::num::NonZeroUsize;
use std::sync::Arc;

use hashbrown::HashMap;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use crate::dataset::{read_json, DataSource};
use crate::error::DatasetError;
use crate::models::PincodeDetail;

/// Pincode -> offices, for every pincode under one prefix
pub type Shard = HashMap<String, Vec<PincodeDetail>>;

/// Reads detail shards from a data source.
///
/// With a capacity of 0 every call re-reads and re-parses the shard.
/// Shards never change once written, so cached entries are never invalidated.
pub struct ShardStore {
    source: Arc<dyn DataSource>,
    details_dir: String,
    cache: Option<Mutex<LruCache<String, Arc<Shard>>>>,
}

impl ShardStore {
    pub fn new(source: Arc<dyn DataSource>, details_dir: &str, capacity: usize) -> Self {
        Self {
            source,
            details_dir: details_dir.to_string(),
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Resource name of the shard for a prefix
    pub fn shard_name(&self, prefix: &str) -> String {
        format!("{}/{}.json", self.details_dir, prefix)
    }

    /// Get the shard for a prefix, reading it if it is not cached.
    pub fn get(&self, prefix: &str) -> Result<Arc<Shard>, DatasetError> {
        if let Some(cache) = &self.cache {
            if let Some(shard) = cache.lock().get(prefix) {
                debug!(prefix, "Shard cache hit");
                return Ok(Arc::clone(shard));
            }
        }

        // Parse outside the lock; a concurrent miss on the same prefix only
        // costs a duplicate parse.
        let name = self.shard_name(prefix);
        let shard: Arc<Shard> = Arc::new(read_json(self.source.as_ref(), &name)?);
        debug!(prefix, pincodes = shard.len(), "Loaded detail shard");

        if let Some(cache) = &self.cache {
            cache.lock().put(prefix.to_string(), Arc::clone(&shard));
        }

        Ok(shard)
    }

    /// Number of shards currently cached
    pub fn cached(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }

    pub fn capacity(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().cap().get())
    }
}

impl std::fmt::Debug for ShardStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardStore")
            .field("source", &self.source.describe())
            .field("details_dir", &self.details_dir)
            .field("cached", &self.cached())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MemorySource;

    const SHARD_110: &str = r#"{
        "110001": [{"office": "Connaught Place SO"}, {"office": "New Delhi GPO"}],
        "110002": [{"office": "Indraprastha HO"}]
    }"#;

    fn source() -> Arc<dyn DataSource> {
        Arc::new(
            MemorySource::new()
                .with("details/110.json", SHARD_110)
                .with("details/400.json", r#"{"400001": []}"#)
                .with("details/500.json", "not json"),
        )
    }

    #[test]
    fn test_get_preserves_record_order() {
        let store = ShardStore::new(source(), "details", 4);
        let shard = store.get("110").unwrap();
        let offices: Vec<&str> = shard["110001"].iter().map(|d| d.office.as_str()).collect();
        assert_eq!(offices, vec!["Connaught Place SO", "New Delhi GPO"]);
    }

    #[test]
    fn test_cache_reuses_parsed_shard() {
        let store = ShardStore::new(source(), "details", 4);
        let first = store.get("110").unwrap();
        let second = store.get("110").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.cached(), 1);
    }

    #[test]
    fn test_cache_is_bounded() {
        let store = ShardStore::new(source(), "details", 1);
        store.get("110").unwrap();
        store.get("400").unwrap();
        assert_eq!(store.cached(), 1);
        assert_eq!(store.capacity(), 1);
    }

    #[test]
    fn test_zero_capacity_reparses() {
        let store = ShardStore::new(source(), "details", 0);
        let first = store.get("110").unwrap();
        let second = store.get("110").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
        assert_eq!(store.cached(), 0);
    }

    #[test]
    fn test_missing_and_malformed_shards() {
        let store = ShardStore::new(source(), "details", 4);
        assert!(matches!(store.get("999"), Err(DatasetError::Missing(_))));
        assert!(matches!(store.get("500"), Err(DatasetError::Json(_))));
        assert_eq!(store.cached(), 0);
    }
}
