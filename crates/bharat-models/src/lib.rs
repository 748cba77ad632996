//! # Bharat Models
//!
//! Domain models shared by the ingest pipeline and the query API.
//!
//! - [`records`]: The cached [`AggregateRecord`] and its [`PeriodType`]
//! - [`fiscal_year`]: Fiscal-year labels (`"2024-2025"`) and month abbreviations
//! - [`districts`]: The single supported state and its ordered district codes

pub mod districts;
pub mod fiscal_year;
pub mod records;

pub use districts::{District, MAHARASHTRA_DISTRICTS};
pub use fiscal_year::{MONTHS, fiscal_year_label, fiscal_years_between, rolling_fiscal_years};
pub use records::{AggregateRecord, PeriodType};
