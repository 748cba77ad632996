//! Span helpers shared by the pipeline and the query services.

use tracing::Span;

/// Create a span for business logic operations
///
/// # Example
/// ```ignore
/// let span = business_span!("pipeline.run", fiscal_years = 6);
/// ```
#[macro_export]
macro_rules! business_span {
    ($operation:expr) => {
        tracing::info_span!(
            $operation,
            otel.kind = "internal",
            otel.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty
        )
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::info_span!(
            $operation,
            otel.kind = "internal",
            otel.status_code = tracing::field::Empty,
            error.message = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Record a successful operation on the current span
pub fn record_success() {
    Span::current().record("otel.status_code", "OK");
}

/// Record a failed operation on the current span with an error message
pub fn record_error(message: &str) {
    let span = Span::current();
    span.record("otel.status_code", "ERROR");
    span.record("error.message", message);
}
