//! Cache Store Module
//!
//! Unsynchronized map of entries. `Cache` wraps it in the single lock shared
//! with the reaper.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key to entry storage with a fixed TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Usage statistics
    stats: CacheStats,
    /// Age at which an entry becomes eligible for removal
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, stamped with the current instant.
    ///
    /// Replacing resets the age baseline of the key.
    pub fn add(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Get ==
    /// Returns a copy of the stored value.
    ///
    /// Freshness is not checked here: a stale entry the reaper has not yet
    /// removed is still returned.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap Expired ==
    /// Removes every entry whose age at `now` is at least the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn reap_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl, now));

        let removed = before - self.entries.len();
        self.stats.record_reaped(removed);
        removed
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the stored keys in arbitrary order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
