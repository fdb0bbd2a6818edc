//! Configuration Module
//!
//! Handles loading and managing store and server configuration from
//! environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Store and front-end configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries each shard can hold
    pub shard_capacity: usize,
    /// Number of independent shards
    pub shard_count: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Number of commands the interactive shell remembers
    pub history_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SHARD_CAPACITY` - Maximum entries per shard (default: 100)
    /// - `SHARD_COUNT` - Number of shards (default: 16)
    /// - `SERVER_PORT` - HTTP server port (default: 50051)
    /// - `HISTORY_SIZE` - Shell history length (default: 50)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            shard_capacity: env_or("SHARD_CAPACITY", defaults.shard_capacity),
            shard_count: env_or("SHARD_COUNT", defaults.shard_count),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            history_size: env_or("HISTORY_SIZE", defaults.history_size),
        }
    }

    /// Rejects sizes the store cannot be built with.
    pub fn validate(&self) -> Result<()> {
        if self.shard_capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "SHARD_CAPACITY must be positive".to_string(),
            ));
        }
        if self.shard_count == 0 {
            return Err(CacheError::InvalidConfig(
                "SHARD_COUNT must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shard_capacity: 100,
            shard_count: 16,
            server_port: 50051,
            history_size: 50,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.shard_capacity, 100);
        assert_eq!(config.shard_count, 16);
        assert_eq!(config.server_port, 50051);
        assert_eq!(config.history_size, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SHARD_CAPACITY");
        env::remove_var("SHARD_COUNT");
        env::remove_var("SERVER_PORT");
        env::remove_var("HISTORY_SIZE");

        let config = Config::from_env();
        assert_eq!(config.shard_capacity, 100);
        assert_eq!(config.shard_count, 16);
        assert_eq!(config.server_port, 50051);
        assert_eq!(config.history_size, 50);
    }

    #[test]
    fn test_config_validate_rejects_zero() {
        let config = Config {
            shard_count: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));

        let config = Config {
            shard_capacity: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
