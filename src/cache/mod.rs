//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction and lazy TTL
//! expiration.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{LruList, SlotId};
pub use stats::CacheStats;
pub use store::Cache;

use std::time::Duration;

// == Public Constants ==
/// Maximum allowed key length in bytes for keys submitted over HTTP
pub const MAX_KEY_LENGTH: usize = 256;

/// Longest accepted default TTL (10 years)
pub const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);
