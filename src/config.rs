//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CAPACITY: usize = 1000;
const DEFAULT_TTL_MS: u64 = 300_000;
const DEFAULT_PORT: u16 = 3000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Values are not range-checked here; [`crate::cache::Cache::new`] rejects a
/// zero capacity or TTL.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// TTL applied to every write
    pub default_ttl: Duration,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 300000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            capacity: env_or("CACHE_CAPACITY", DEFAULT_CAPACITY),
            default_ttl: Duration::from_millis(env_or("CACHE_TTL_MS", DEFAULT_TTL_MS)),
            server_port: env_or("SERVER_PORT", DEFAULT_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            default_ttl: Duration::from_millis(DEFAULT_TTL_MS),
            server_port: DEFAULT_PORT,
        }
    }
}

/// Parses an environment variable, falling back to `default` when it is
/// unset or malformed.
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
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.default_ttl, Duration::from_secs(300));
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env() {
        env::remove_var("SERVER_PORT");
        env::set_var("CACHE_CAPACITY", "16");
        env::set_var("CACHE_TTL_MS", "not-a-number");

        let config = Config::from_env();
        assert_eq!(config.capacity, 16);
        assert_eq!(config.default_ttl, Duration::from_secs(300));
        assert_eq!(config.server_port, 3000);

        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_TTL_MS");
    }
}
