//! Cache Store Module
//!
//! Main cache engine combining a key index with the LRU list and lazy TTL
//! expiration, all guarded by a single lock.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruList, SlotId, MAX_TTL};
use crate::error::{CacheError, Result};

/// State mutated by every cache operation.
#[derive(Debug)]
struct CacheState<V> {
    /// Key to slot in `order`
    index: HashMap<String, SlotId>,
    /// Entries from most to least recently used
    order: LruList<V>,
    stats: CacheStats,
}

// == Cache ==
/// Thread-safe key/value cache with LRU eviction and per-entry TTL.
///
/// Every public operation holds the internal lock for its whole duration.
/// Expired entries are only noticed when read; nothing sweeps them in the
/// background, so they keep their slot until a `get`, an eviction or a
/// `purge` removes them.
#[derive(Debug)]
pub struct Cache<V> {
    state: Mutex<CacheState<V>>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied on every write
    default_ttl: Duration,
}

impl<V> Cache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    /// * `default_ttl` - Lifetime of an entry, counted from its last write
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidConfig`] if either argument is zero or the
    /// TTL exceeds [`MAX_TTL`].
    pub fn new(capacity: usize, default_ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if default_ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "default TTL must be greater than zero".to_string(),
            ));
        }
        if default_ttl > MAX_TTL {
            return Err(CacheError::InvalidConfig(format!(
                "default TTL must not exceed {} seconds",
                MAX_TTL.as_secs()
            )));
        }

        debug!(capacity, ttl_ms = default_ttl.as_millis() as u64, "cache created");

        Ok(Self {
            state: Mutex::new(CacheState {
                index: HashMap::with_capacity(capacity),
                order: LruList::with_capacity(capacity),
                stats: CacheStats::new(),
            }),
            capacity,
            default_ttl,
        })
    }

    // == Add ==
    /// Stores a value under `key`.
    ///
    /// An existing key gets the new value, a fresh TTL and becomes the most
    /// recently used entry. A new key on a full cache first evicts the least
    /// recently used entry.
    pub fn add(&self, key: impl Into<String>, value: V) {
        self.add_at(key.into(), value, Instant::now());
    }

    pub(crate) fn add_at(&self, key: String, value: V, now: Instant) {
        let mut guard = self.lock();
        let state = &mut *guard;

        if let Some(slot) = state.index.get(&key).copied() {
            if let Some(entry) = state.order.get_mut(slot) {
                entry.refresh(value, self.default_ttl, now);
            }
            state.order.move_to_front(slot);
            return;
        }

        if state.order.len() >= self.capacity {
            if let Some(evicted) = state.order.pop_back() {
                state.index.remove(&evicted.key);
                state.stats.record_eviction();
                debug!(key = %evicted.key, "evicted least recently used entry");
            }
        }

        let entry = CacheEntry::new(key.clone(), value, self.default_ttl, now);
        let slot = state.order.push_front(entry);
        state.index.insert(key, slot);
        state.stats.set_total_entries(state.order.len());
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// A hit marks the entry as most recently used but does not extend its
    /// TTL. An expired entry is removed and reported as absent.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at(&self, key: &str, now: Instant) -> Option<V>
    where
        V: Clone,
    {
        let mut guard = self.lock();
        let state = &mut *guard;

        let Some(slot) = state.index.get(key).copied() else {
            state.stats.record_miss();
            return None;
        };

        let expired = state
            .order
            .get(slot)
            .map_or(true, |entry| entry.is_expired_at(now));
        if expired {
            state.order.remove(slot);
            state.index.remove(key);
            state.stats.record_expiration();
            state.stats.record_miss();
            state.stats.set_total_entries(state.order.len());
            debug!(key, "removed expired entry on read");
            return None;
        }

        state.order.move_to_front(slot);
        state.stats.record_hit();
        state.order.get(slot).map(|entry| entry.value.clone())
    }

    // == Purge ==
    /// Discards every entry. Lifetime counters in [`CacheStats`] are kept.
    pub fn purge(&self) {
        let mut guard = self.lock();
        let state = &mut *guard;

        let removed = state.order.len();
        state.index.clear();
        state.order.clear();
        state.stats.set_total_entries(0);
        debug!(removed, "cache purged");
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.order.len());
        stats
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones that
    /// have not been read yet.
    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Acquires the state lock. Every mutation leaves the state consistent
    /// before it can panic, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, CacheState<V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Asserts that the index and the recency list describe the same entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let state = self.lock();
        assert_eq!(state.index.len(), state.order.len());
        assert!(state.order.len() <= self.capacity);
        assert_eq!(state.order.iter().count(), state.order.len());
        for (key, &slot) in &state.index {
            let entry = state.order.get(slot).expect("indexed slot must be occupied");
            assert_eq!(&entry.key, key);
        }
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<String> {
        self.lock().order.iter().map(|entry| entry.key.clone()).collect()
    }
}
