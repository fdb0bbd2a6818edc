//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies. The store accepts
//! any string; key and value limits are enforced here, at the edge.

use serde::Deserialize;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Request body for the PUT operation (PUT /put)
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
}

impl PutRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        if self.value.len() > MAX_VALUE_SIZE {
            return Some(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            ));
        }
        None
    }
}

/// Request body for the batched insert (POST /put_many)
#[derive(Debug, Clone, Deserialize)]
pub struct PutManyRequest {
    /// Pairs to insert, applied in order within each shard
    #[serde(default)]
    pub pairs: Vec<PutRequest>,
}

impl PutManyRequest {
    /// Validates every pair, reporting the first offending position.
    pub fn validate(&self) -> Option<String> {
        self.pairs.iter().enumerate().find_map(|(i, pair)| {
            pair.validate()
                .map(|msg| format!("pair {}: {}", i, msg))
        })
    }

    /// Consumes the request into `(key, value)` tuples for the store.
    pub fn into_pairs(self) -> impl Iterator<Item = (String, String)> {
        self.pairs.into_iter().map(|pair| (pair.key, pair.value))
    }
}
