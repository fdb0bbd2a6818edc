//! STORM - A sharded in-memory key-value cache
//!
//! Keys are spread over independently locked shards, each a bounded LRU.
//! The store is exposed over HTTP and through an interactive shell.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod shell;

pub use api::AppState;
pub use cache::ShardedStore;
pub use config::Config;
