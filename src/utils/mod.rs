//! Shared utilities.
//!
//! - [`tracing`]: Span helpers for pipeline and service operations

pub mod tracing;
