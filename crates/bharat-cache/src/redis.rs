//! Redis cache client.
//!
//! Provides bulk async Redis operations with JSON serialization for cached values.

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

/// Redis cache client with a shared, auto-reconnecting connection.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by a `RecordStore` that is not backed by Redis.
    #[error("Cache backend error: {0}")]
    Backend(String),
}

impl RedisCache {
    /// Creates a new Redis cache client.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the URL is invalid or the server is unreachable.
    pub async fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }

    /// Writes every `(key, value)` pair in one `MSET`, serializing values as JSON.
    ///
    /// An empty slice is a no-op.
    #[instrument(skip(self, pairs), fields(cache.operation = "MSET", cache.keys = pairs.len()))]
    pub async fn mset_json<K, T>(&self, pairs: &[(K, T)]) -> Result<(), CacheError>
    where
        K: AsRef<str>,
        T: Serialize,
    {
        if pairs.is_empty() {
            return Ok(());
        }

        let encoded = pairs
            .iter()
            .map(|(key, value)| -> Result<(String, String), CacheError> {
                Ok((key.as_ref().to_string(), serde_json::to_string(value)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.conn.clone();
        conn.mset::<_, _, ()>(&encoded).await?;

        debug!(cache.keys = encoded.len(), "Cache bulk set");

        Ok(())
    }

    /// Reads every key in one `MGET`, preserving request order.
    ///
    /// Missing keys and values that fail to deserialize come back as `None`.
    #[instrument(skip(self, keys), fields(cache.operation = "MGET", cache.keys = keys.len()))]
    pub async fn mget_json<T>(&self, keys: &[String]) -> Result<Vec<Option<T>>, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();
        let raw: Vec<Option<String>> = redis::cmd("MGET").arg(keys).query_async(&mut conn).await?;

        let values = raw
            .into_iter()
            .zip(keys)
            .map(|(value, key)| {
                let value = value?;
                match serde_json::from_str(&value) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        warn!(cache.key = %key, error = %e, "Failed to deserialize cached value");
                        None
                    }
                }
            })
            .collect::<Vec<_>>();

        let hits = values.iter().filter(|v| v.is_some()).count();
        debug!(cache.hits = hits, cache.misses = keys.len() - hits, "Cache bulk get");

        Ok(values)
    }

    /// Round-trips a `PING`, used at startup to fail fast on a bad address.
    #[instrument(skip(self), fields(cache.operation = "PING"))]
    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let reply: String = redis::cmd("PING").query_async(&mut conn).await.map_err(|e| {
            error!(error = %e, "Redis PING failed");
            e
        })?;
        debug!(reply = %reply, "Redis reachable");
        Ok(())
    }
}
