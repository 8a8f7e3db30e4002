//! In-memory response cache for stat provider documents
//!
//! Entries live in an LRU keyed by request URL. Each entry is a single-flight
//! cell: concurrent lookups of the same key wait for one fetch, while
//! different keys fetch in parallel. A failed fetch leaves the cell empty so
//! the next lookup retries.

use crate::Result;
use lru::LruCache;
use std::{
    future::Future,
    hash::Hash,
    num::NonZeroUsize,
    sync::{Arc, Mutex},
};
use tokio::sync::OnceCell;

const FALLBACK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(n) => n,
    None => unreachable!(),
};

/// LRU of single-flight cells
pub struct ResponseCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    entries: Mutex<LruCache<K, Arc<OnceCell<V>>>>,
}

impl<K, V> ResponseCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Cache holding up to `capacity` entries (zero falls back to a default)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(FALLBACK_CAPACITY);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn cell(&self, key: &K) -> Arc<OnceCell<V>> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(cell) = entries.get(key).cloned() {
            return cell;
        }
        let cell = Arc::new(OnceCell::new());
        entries.put(key.clone(), Arc::clone(&cell));
        cell
    }

    /// Cached value for `key`, running `fetch` only if no value is stored
    /// and no other caller is already fetching it.
    pub async fn get_or_fetch<F, Fut>(&self, key: &K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        // The LRU lock is released before awaiting
        let cell = self.cell(key);
        cell.get_or_try_init(fetch).await.cloned()
    }
}
