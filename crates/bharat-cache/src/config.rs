//! Redis cache configuration.
//!
//! This module provides configuration for Redis connection settings
//! loaded from environment variables.

use std::env;

const DEFAULT_REDIS_ADDR: &str = "127.0.0.1:6379";

/// Redis cache configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `REDIS_URL`: Full connection URL; takes precedence when set
/// - `REDIS_ADDR`: `host:port` of the Redis server (default: `127.0.0.1:6379`)
/// - `REDIS_PASS`: Password (default: empty, no auth)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Redis connection URL, always targeting database 0.
    pub redis_url: String,
}

impl CacheConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        if let Some(url) = env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()) {
            return Self { redis_url: url };
        }

        let addr = env::var("REDIS_ADDR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REDIS_ADDR.into());
        let password = env::var("REDIS_PASS").unwrap_or_default();

        Self::from_parts(&addr, &password)
    }

    /// Build a `redis://` URL from an address and optional password.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = CacheConfig::from_parts("10.0.0.5:6379", "secret");
    /// // redis://:secret@10.0.0.5:6379/0
    /// ```
    pub fn from_parts(addr: &str, password: &str) -> Self {
        let redis_url = if password.is_empty() {
            format!("redis://{}/0", addr)
        } else {
            format!("redis://:{}@{}/0", password, addr)
        };

        Self { redis_url }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::from_parts(DEFAULT_REDIS_ADDR, "")
    }
}
