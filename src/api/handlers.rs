//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::cache::ShardedStore;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, GetResponse, HealthResponse, KeyResponse, ListResponse, PutManyRequest,
    PutManyResponse, PutRequest, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The store synchronizes internally per shard, so handlers share it
/// through a plain `Arc` and never take a store-wide lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ShardedStore>,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: ShardedStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ShardedStore::from_config(config)?))
    }
}

/// Handler for PUT /put
///
/// Stores a key-value pair, overwriting any previous value.
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<PutRequest>,
) -> Result<Json<KeyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.store.put(req.key.clone(), req.value);

    Ok(Json(KeyResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.store.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KeyResponse>> {
    if state.store.del(&key) {
        Ok(Json(KeyResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for POST /put_many
///
/// Validates every pair before writing any of them, then hands the batch to
/// the store, which locks each destination shard once.
pub async fn put_many_handler(
    State(state): State<AppState>,
    Json(req): Json<PutManyRequest>,
) -> Result<Json<PutManyResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let report = state.store.put_many(req.into_pairs());
    debug!(
        applied = report.applied,
        shards_locked = report.shards_locked,
        "put_many request"
    );

    Ok(Json(PutManyResponse {
        applied: report.applied,
        shards_locked: report.shards_locked,
    }))
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    Json(ClearResponse::new(state.store.clear()))
}

/// Handler for GET /list
///
/// Diagnostic dump of every shard, most recently used first.
pub async fn list_handler(State(state): State<AppState>) -> Json<ListResponse> {
    Json(ListResponse::from(state.store.list()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.store.stats();

    Json(StatsResponse::new(
        &stats,
        state.store.shard_count(),
        state.store.shard_capacity(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
