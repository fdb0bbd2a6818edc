//! Cache Module
//!
//! Sharded in-memory key-value store with per-shard LRU eviction.

mod entry;
mod lru;
mod shard;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{NodeId, RecencyList};
pub use shard::Shard;
pub use stats::CacheStats;
pub use store::{
    shard_index, BatchReport, ShardListing, ShardedStore, DEFAULT_SHARD_CAPACITY,
    DEFAULT_SHARD_COUNT,
};
