use super::CacheMetrics;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use splitdns_application::ports::AnswerCache;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{debug, info};

/// Concurrent name → answer map shared by every resolution.
///
/// Entries never expire. With `max_entries > 0` an arbitrary entry is evicted
/// to make room once the bound is reached; `0` leaves the cache unbounded.
pub struct MemoryAnswerCache {
    cache: DashMap<Arc<str>, Arc<str>, FxBuildHasher>,
    max_entries: usize,
    metrics: Arc<CacheMetrics>,
}

impl MemoryAnswerCache {
    pub fn new(max_entries: usize) -> Self {
        info!(max_entries = max_entries, "Initializing answer cache");

        let cache = if max_entries > 0 {
            DashMap::with_capacity_and_hasher(max_entries.min(4096), FxBuildHasher)
        } else {
            DashMap::with_hasher(FxBuildHasher)
        };

        Self {
            cache,
            max_entries,
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    fn make_room(&self) {
        if self.max_entries == 0 || self.cache.len() < self.max_entries {
            return;
        }

        // The iterator holds a shard read lock; release it before removing.
        let victim = self.cache.iter().next().map(|entry| Arc::clone(entry.key()));

        if let Some(key) = victim {
            if self.cache.remove(&key).is_some() {
                self.metrics.evictions.fetch_add(1, Ordering::Relaxed);
                debug!(domain = %key, "Evicted cached answer");
            }
        }
    }
}

impl AnswerCache for MemoryAnswerCache {
    fn get(&self, name: &str) -> Option<Arc<str>> {
        match self.cache.get(name) {
            Some(entry) => {
                self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(entry.value()))
            }
            None => {
                self.metrics.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn set(&self, name: &str, value: Arc<str>) {
        if let Some(mut entry) = self.cache.get_mut(name) {
            *entry.value_mut() = value;
            self.metrics.insertions.fetch_add(1, Ordering::Relaxed);
            return;
        }

        self.make_room();
        self.cache.insert(Arc::from(name), value);
        self.metrics.insertions.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for MemoryAnswerCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
