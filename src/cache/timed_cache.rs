//! Time-based cache with TTL (Time To Live) support.
//!
//! Used to remember per-domain DNS verdicts and company→domain discoveries
//! for the length of a batch, so the many candidates of one person (and
//! repeated companies across people) cost one round of lookups.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// A thread-safe cache with time-based expiration.
///
/// Clones share the same storage. A TTL of zero disables the cache: inserts
/// are dropped and every lookup misses.
#[derive(Clone)]
pub struct TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    cache: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new TimedCache with the specified TTL in seconds.
    pub fn new(ttl_seconds: u64) -> Self {
        Self::with_ttl(Duration::from_secs(ttl_seconds))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Whether entries are retained at all.
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Insert a value, replacing any previous entry for the key.
    pub fn insert(&self, key: K, value: V) {
        if !self.is_enabled() {
            return;
        }

        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, entry);
        }
    }

    /// Get a value if it exists and hasn't expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();

        let cache = self.cache.read().ok()?;
        cache
            .get(key)
            .filter(|entry| now.duration_since(entry.inserted_at) < self.ttl)
            .map(|entry| entry.value.clone())
    }

    /// Return the cached value, or compute, store and return it.
    ///
    /// The lock is not held while `compute` runs, so two threads missing on
    /// the same key may both compute; the later insert wins.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> (V, bool)
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return (value, true);
        }
        let value = compute();
        self.insert(key, value.clone());
        (value, false)
    }

    /// Remove all expired entries.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();

        if let Ok(mut cache) = self.cache.write() {
            cache.retain(|_, entry| now.duration_since(entry.inserted_at) < self.ttl);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Number of entries, including expired ones not yet cleaned up.
    pub fn len(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<K, V> std::fmt::Debug for TimedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}
