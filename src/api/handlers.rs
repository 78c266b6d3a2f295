//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    AddRequest, AddResponse, GetResponse, HealthResponse, PurgeResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache synchronizes internally, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Shared JSON-valued cache
    pub cache: Arc<Cache<Value>>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: Cache<Value>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured capacity or TTL is rejected by the cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Cache::new(config.capacity, config.default_ttl)?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /entries
///
/// Stores a value under the given key, refreshing it if already present.
pub async fn add_handler(
    State(state): State<AppState>,
    Json(req): Json<AddRequest>,
) -> Result<Json<AddResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.cache.add(req.key.clone(), req.value);

    Ok(Json(AddResponse::new(req.key)))
}

/// Handler for GET /entries/:key
///
/// Returns 404 for keys that are absent or whose TTL has elapsed.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /entries
pub async fn purge_handler(State(state): State<AppState>) -> Json<PurgeResponse> {
    state.cache.purge();
    Json(PurgeResponse::new())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();

    Json(StatsResponse::new(
        &stats,
        state.cache.capacity(),
        state.cache.default_ttl().as_millis() as u64,
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
