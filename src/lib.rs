//! # Bharat Digital API
//!
//! Fetches MGNREGA district statistics for Maharashtra from data.gov.in,
//! aggregates them per month and per fiscal year, caches the records in
//! Redis and serves them over a small read-only HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── modules/          # Feature modules
//! │   ├── stats/       # /state/all and /district/{districtcode}
//! │   ├── cron/        # On-demand runs and run status
//! │   └── health/      # Liveness
//! ├── scheduler/        # Pipeline run and cron timer
//! └── utils/            # Tracing helpers
//! ```
//!
//! Write path: cron timer or `POST /cron/trigger` → [`scheduler::Pipeline`]
//! → `bharat_ingest` fetch + transform → Redis `MSET`.
//! Read path: query handlers rebuild cache keys and issue one `MGET`.
//!
//! ## Cache keys
//!
//! | Record | Key |
//! |--------|-----|
//! | Fiscal year | `<districtCode>_FY<start>-<end>` |
//! | Month | `<districtCode>_FY<start>-<end>_<Mon>` |
//!
//! ## Quick Start
//!
//! ```bash
//! REDIS_ADDR=127.0.0.1:6379
//! DATA_GOV_API_KEY=your-key
//! CRON_SCHEDULE="0 2 * * *"
//! cargo run --bin bharat-digital
//! ```
//!
//! API documentation is served at `/swagger-ui` and `/scalar`.
//!
//! ## Modules
//!
//! - [`docs`]: OpenAPI documentation setup
//! - [`logging`]: Request logging and tracing subscriber setup
//! - [`metrics`]: Prometheus metrics endpoint and pipeline counters
//! - [`modules`]: HTTP feature modules
//! - [`router`]: Main application router
//! - [`scheduler`]: Pipeline runs, single-flight guard and cron timer
//! - [`server`]: Process bootstrap and graceful shutdown
//! - [`state`]: Shared application state

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod modules;
pub mod router;
pub mod scheduler;
pub mod server;
pub mod state;
pub mod utils;

// Re-export workspace crates for convenience
pub use bharat_cache;
pub use bharat_config;
pub use bharat_core;
pub use bharat_ingest;
pub use bharat_models;
