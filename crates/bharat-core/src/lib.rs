//! # Bharat Core
//!
//! Core types shared by the Bharat Digital API crates.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`extract`]: Query extractor that rejects through [`AppError`]
//! - [`response`]: The `{success, message, data}` JSON envelope used by every endpoint
//!
//! # Example
//!
//! ```ignore
//! use bharat_core::{ApiResponse, AppError};
//!
//! let ok = ApiResponse::ok(vec![1, 2, 3]);
//! let err = AppError::bad_request(anyhow::anyhow!("state_name required"));
//! ```

pub mod errors;
pub mod extract;
pub mod response;

pub use errors::AppError;
pub use extract::ApiQuery;
pub use response::ApiResponse;
