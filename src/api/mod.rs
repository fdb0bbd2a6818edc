//! API Module
//!
//! HTTP handlers and routing that expose the sharded store as a JSON service.
//!
//! # Endpoints
//! - `PUT /put` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `POST /put_many` - Store a batch of pairs
//! - `POST /clear` - Remove every entry
//! - `GET /list` - Diagnostic dump of every shard
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
