//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, ShardListing};

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for single-key writes (PUT /put, DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct KeyResponse {
    /// Always true; failures are reported as errors
    pub success: bool,
    /// The key that was written or deleted
    pub key: String,
}

impl KeyResponse {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            success: true,
            key: key.into(),
        }
    }
}

/// Response body for the batched insert (POST /put_many)
#[derive(Debug, Clone, Serialize)]
pub struct PutManyResponse {
    /// Number of pairs written
    pub applied: usize,
    /// Number of shards the batch touched
    pub shards_locked: usize,
}

/// Response body for POST /clear
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    /// Number of entries dropped
    pub removed: usize,
}

impl ClearResponse {
    pub fn new(removed: usize) -> Self {
        Self {
            success: true,
            removed,
        }
    }
}

/// One key-value pair in a shard listing
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub key: String,
    pub value: String,
}

/// One shard in a listing, entries most recently used first
#[derive(Debug, Clone, Serialize)]
pub struct ShardView {
    pub shard: usize,
    pub entries: Vec<EntryView>,
}

/// Response body for the diagnostic listing (GET /list)
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub shards: Vec<ShardView>,
}

impl From<Vec<ShardListing>> for ListResponse {
    fn from(listing: Vec<ShardListing>) -> Self {
        let shards = listing
            .into_iter()
            .map(|shard| ShardView {
                shard: shard.shard,
                entries: shard
                    .entries
                    .into_iter()
                    .map(|(key, value)| EntryView { key, value })
                    .collect(),
            })
            .collect();
        Self { shards }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries across all shards
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    pub shard_count: usize,
    pub shard_capacity: usize,
}

impl StatsResponse {
    /// Creates a new StatsResponse from aggregated store statistics
    pub fn new(stats: &CacheStats, shard_count: usize, shard_capacity: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            shard_count,
            shard_capacity,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", "test_value");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("test_key"));
        assert!(json.contains("test_value"));
    }

    #[test]
    fn test_key_response_serialize() {
        let resp = KeyResponse::new("my_key");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["key"], "my_key");
    }

    #[test]
    fn test_list_response_from_listing() {
        let listing = vec![
            ShardListing {
                shard: 0,
                entries: vec![("b".to_string(), "2".to_string()), ("a".to_string(), "1".to_string())],
            },
            ShardListing {
                shard: 1,
                entries: vec![],
            },
        ];

        let json = serde_json::to_value(ListResponse::from(listing)).unwrap();
        assert_eq!(json["shards"][0]["shard"], 0);
        assert_eq!(json["shards"][0]["entries"][0]["key"], "b");
        assert_eq!(json["shards"][0]["entries"][1]["value"], "1");
        assert_eq!(json["shards"][1]["entries"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            total_entries: 100,
        };
        let resp = StatsResponse::new(&stats, 16, 100);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.shard_count, 16);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
