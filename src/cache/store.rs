//! Sharded Store Module
//!
//! Routes keys onto a fixed set of independently locked LRU shards.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::cache::{CacheStats, Shard};
use crate::config::Config;
use crate::error::{CacheError, Result};

/// Per-shard capacity used by [`ShardedStore::default`]
pub const DEFAULT_SHARD_CAPACITY: usize = 100;

/// Shard count used by [`ShardedStore::default`]
pub const DEFAULT_SHARD_COUNT: usize = 16;

// == Listing ==
/// Contents of one shard, most recently used first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShardListing {
    /// Position of the shard in the store
    pub shard: usize,
    /// Key-value pairs from most to least recently used
    pub entries: Vec<(String, String)>,
}

// == Batch Report ==
/// Outcome of a [`ShardedStore::put_many`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Number of pairs written
    pub applied: usize,
    /// Number of shard locks taken, one per distinct shard touched
    pub shards_locked: usize,
}

// == Sharded Store ==
/// Concurrent key-value store partitioned into LRU shards.
///
/// Every operation locks at most one shard at a time and there is no global
/// lock, so callers whose keys land on different shards never contend.
/// Share it across threads as `Arc<ShardedStore>`.
#[derive(Debug)]
pub struct ShardedStore {
    /// Fixed after construction
    shards: Vec<Mutex<Shard>>,
    shard_capacity: usize,
}

impl Default for ShardedStore {
    fn default() -> Self {
        match Self::new(DEFAULT_SHARD_CAPACITY, DEFAULT_SHARD_COUNT) {
            Ok(store) => store,
            Err(err) => unreachable!("default store sizes are positive: {}", err),
        }
    }
}

impl ShardedStore {
    // == Constructor ==
    /// Creates a store of `shard_count` shards holding `shard_capacity`
    /// entries each.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfig` if either argument is zero.
    pub fn new(shard_capacity: usize, shard_count: usize) -> Result<Self> {
        if shard_count == 0 {
            return Err(CacheError::InvalidConfig(
                "shard count must be positive".to_string(),
            ));
        }

        let shards = (0..shard_count)
            .map(|_| Shard::new(shard_capacity).map(Mutex::new))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            shards,
            shard_capacity,
        })
    }

    /// Creates a store sized by the given configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.shard_capacity, config.shard_count)
    }

    // == Routing ==
    /// Returns the index of the shard that owns `key`.
    ///
    /// `DefaultHasher::new()` is SipHash with fixed keys, so the mapping is
    /// the same for every call over the life of the store.
    pub fn shard_index_of(&self, key: &str) -> usize {
        shard_index(key, self.shards.len())
    }

    fn shard_for(&self, key: &str) -> &Mutex<Shard> {
        &self.shards[self.shard_index_of(key)]
    }

    // == Put ==
    /// Inserts or overwrites a key. Always returns `true`.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let mut shard = self.shard_for(&key).lock();
        shard.put(key, value.into())
    }

    // == Get ==
    /// Retrieves a value and marks the key as most recently used in its shard.
    pub fn get(&self, key: &str) -> Option<String> {
        self.shard_for(key).lock().get(key)
    }

    // == Delete ==
    /// Removes a key. Returns whether it existed.
    pub fn del(&self, key: &str) -> bool {
        self.shard_for(key).lock().del(key)
    }

    // == Put Many ==
    /// Inserts a batch of pairs, locking each destination shard once.
    ///
    /// Pairs are bucketed by shard before any lock is taken; each bucket is
    /// then applied in input order under its shard's lock. There is no
    /// atomicity across shards and no per-pair failure.
    pub fn put_many<I, K, V>(&self, pairs: I) -> BatchReport
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut buckets: Vec<Vec<(String, String)>> = vec![Vec::new(); self.shards.len()];
        for (key, value) in pairs {
            let key = key.into();
            let idx = self.shard_index_of(&key);
            buckets[idx].push((key, value.into()));
        }

        let mut report = BatchReport::default();
        for (idx, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }

            let count = bucket.len();
            let mut shard = self.shards[idx].lock();
            for (key, value) in bucket {
                shard.put(key, value);
            }
            drop(shard);

            report.applied += count;
            report.shards_locked += 1;
        }

        debug!(
            applied = report.applied,
            shards_locked = report.shards_locked,
            "applied batch"
        );
        report
    }

    // == Clear ==
    /// Empties every shard, one lock at a time.
    ///
    /// Not a snapshot: concurrent readers may see some shards cleared and
    /// others not yet. Returns the number of entries removed.
    pub fn clear(&self) -> usize {
        let removed = self.shards.iter().map(|shard| shard.lock().clear()).sum();
        debug!(removed, "cleared store");
        removed
    }

    // == List ==
    /// Copies every shard's contents, most recently used first.
    ///
    /// Diagnostic only. Holds each shard lock while copying that shard.
    pub fn list(&self) -> Vec<ShardListing> {
        self.shards
            .iter()
            .enumerate()
            .map(|(shard, lock)| ShardListing {
                shard,
                entries: lock.lock().snapshot(),
            })
            .collect()
    }

    // == Stats ==
    /// Returns statistics summed over all shards.
    pub fn stats(&self) -> CacheStats {
        self.shards
            .iter()
            .fold(CacheStats::new(), |mut total, shard| {
                total.merge(&shard.lock().stats());
                total
            })
    }

    // == Integrity ==
    /// Runs every shard's consistency check, each under its own lock.
    pub fn is_consistent(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_consistent())
    }

    /// Returns the number of entries currently held by each shard.
    pub fn shard_lens(&self) -> Vec<usize> {
        self.shards.iter().map(|shard| shard.lock().len()).collect()
    }

    // == Length ==
    /// Returns the total number of live entries.
    ///
    /// Shards are counted one after another, so the total may be stale under
    /// concurrent writes.
    pub fn len(&self) -> usize {
        self.shard_lens().into_iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    pub fn shard_capacity(&self) -> usize {
        self.shard_capacity
    }

    /// Returns the total addressable capacity, `shard_capacity * shard_count`.
    pub fn capacity(&self) -> usize {
        self.shard_capacity * self.shards.len()
    }
}

/// Maps `key` onto `[0, shard_count)`.
pub fn shard_index(key: &str, shard_count: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    (hasher.finish() % shard_count as u64) as usize
}
