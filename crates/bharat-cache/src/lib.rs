//! # Bharat Cache
//!
//! Redis-backed storage for aggregate records.
//!
//! This crate provides:
//! - Redis connection management and bulk JSON `MSET`/`MGET`
//! - The [`RecordStore`] seam used by the pipeline and the query API
//! - Cache configuration from environment variables
//! - The cache key scheme (`<district>_FY<fy>` and `<district>_FY<fy>_<Mon>`)
//!
//! # Example
//!
//! ```ignore
//! use bharat_cache::{CacheConfig, RedisCache, RecordStore, keys};
//!
//! let config = CacheConfig::from_env();
//! let cache = RedisCache::new(&config.redis_url).await?;
//! let found = cache.get_records(&[keys::year("1810", "2024-2025")]).await?;
//! ```

pub mod config;
pub mod keys;
pub mod redis;
pub mod store;

pub use config::CacheConfig;
pub use redis::{CacheError, RedisCache};
pub use store::{RecordBatch, RecordStore};
