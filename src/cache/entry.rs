//! Cache Entry Module
//!
//! Defines the record a shard keeps for every live key.

use crate::cache::NodeId;

// == Cache Entry ==
/// A stored value plus the position of its key in the shard's recency list.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Node holding this entry's key in the owning shard's recency list
    pub node: NodeId,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry linked to `node`.
    pub fn new(value: String, node: NodeId) -> Self {
        Self { value, node }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RecencyList;

    #[test]
    fn test_entry_creation() {
        let mut list = RecencyList::new();
        let node = list.push_front("test_key".to_string());
        let entry = CacheEntry::new("test_value".to_string(), node);

        assert_eq!(entry.value, "test_value");
        assert_eq!(list.key(entry.node), Some("test_key"));
    }
}
