//! # Bharat Ingest
//!
//! The write side of the pipeline, minus storage:
//!
//! - [`fetcher`]: one HTTP GET per state and fiscal year against the upstream
//!   CSV API, parsed into header-to-value row mappings
//! - [`transform`]: rows into month records and fiscal-year aggregates keyed
//!   by cache key
//!
//! # Example
//!
//! ```ignore
//! use bharat_ingest::{DataGovClient, StatsSource, rows_to_records};
//!
//! let client = DataGovClient::new(&UpstreamConfig::from_env())?;
//! let rows = client.fetch_rows("MAHARASHTRA", "2024-2025").await?;
//! let batch = rows_to_records(&rows).into_batch();
//! ```

pub mod fetcher;
pub mod transform;

pub use fetcher::{CsvRow, DataGovClient, FetchError, StatsSource, parse_csv};
pub use transform::{TransformOutput, month_abbrev, parse_metric, rows_to_records};
