//! Cache Shard Module
//!
//! One independently locked partition of the store: a key index, a recency
//! list and a fixed capacity enforced by LRU eviction.
//!
//! A `Shard` carries no lock of its own. The store wraps each shard in a
//! `parking_lot::Mutex`, so every method here runs with that lock held.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyList};
use crate::error::{CacheError, Result};

// == Cache Shard ==
/// Bounded LRU map of string keys to string values.
#[derive(Debug)]
pub struct Shard {
    /// Key lookup index
    index: HashMap<String, CacheEntry>,
    /// Keys ordered most recently used first
    recency: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl Shard {
    // == Constructor ==
    /// Creates an empty shard holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfig` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "shard capacity must be positive".to_string(),
            ));
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity),
            recency: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// Overwriting an existing key refreshes its recency and never evicts.
    /// Inserting a new key into a full shard evicts the least recently used
    /// entry first. Always returns `true`.
    pub fn put(&mut self, key: String, value: String) -> bool {
        if let Some(entry) = self.index.get_mut(&key) {
            entry.value = value;
            self.recency.move_to_front(entry.node);
            return true;
        }

        if self.index.len() >= self.capacity {
            self.evict_oldest();
        }

        let node = self.recency.push_front(key.clone());
        self.index.insert(key, CacheEntry::new(value, node));
        true
    }

    // == Get ==
    /// Retrieves a value by key and marks the key as most recently used.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.index.get(key) {
            Some(entry) => {
                self.recency.move_to_front(entry.node);
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether the key existed.
    pub fn del(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(entry) => {
                self.recency.remove(entry.node);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes every entry and returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.index.len();
        self.index.clear();
        self.recency.clear();
        removed
    }

    // == Snapshot ==
    /// Copies the live entries, most recently used first.
    ///
    /// Read-only: recency order is not touched.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.recency
            .iter()
            .filter_map(|(_, key)| {
                self.index
                    .get(key)
                    .map(|entry| (key.to_string(), entry.value.clone()))
            })
            .collect()
    }

    // == Integrity ==
    /// Checks that the index and the recency list describe the same entries.
    ///
    /// Verifies equal sizes, the capacity bound, and that every linked key
    /// resolves to an entry pointing back at the same node.
    pub fn is_consistent(&self) -> bool {
        if self.index.len() != self.recency.len() || self.index.len() > self.capacity {
            return false;
        }

        let mut walked = 0;
        for (node, key) in self.recency.iter() {
            match self.index.get(key) {
                Some(entry) if entry.node == node => walked += 1,
                _ => return false,
            }
        }

        walked == self.index.len()
    }

    // == Stats ==
    /// Returns this shard's statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    /// Returns the least recently used key, the next eviction victim.
    pub fn oldest_key(&self) -> Option<&str> {
        self.recency.peek_back()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn evict_oldest(&mut self) {
        if let Some(evicted) = self.recency.pop_back() {
            self.index.remove(&evicted);
            self.stats.record_eviction();
            debug!(key = %evicted, "evicted least recently used entry");
        }
    }
}
