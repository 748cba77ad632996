//! # Bharat Config
//!
//! Configuration types for the Bharat Digital API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`server`]: Listen port and shutdown grace period
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`upstream`]: data.gov.in API credentials, endpoint and timeouts
//! - [`schedule`]: Cron expression, fiscal-year list and inter-year delay
//!
//! # Example
//!
//! ```ignore
//! use bharat_config::{CorsConfig, ScheduleConfig, ServerConfig, UpstreamConfig};
//!
//! let server = ServerConfig::from_env();
//! let schedule = ScheduleConfig::from_env();
//! ```

pub mod cors;
pub mod schedule;
pub mod server;
pub mod upstream;

pub use cors::CorsConfig;
pub use schedule::{ConfigError, ScheduleConfig};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

/// Reads an environment variable, treating unset and blank values alike.
pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Reads and parses an environment variable, falling back to `default`.
pub(crate) fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_non_empty(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
