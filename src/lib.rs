//! LRU TTL Cache - A bounded in-memory cache with LRU eviction and TTL expiry
//!
//! The [`cache::Cache`] engine is usable on its own; the `api` module serves a
//! JSON-valued instance over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::Cache;
pub use config::Config;
pub use error::{CacheError, Result};
