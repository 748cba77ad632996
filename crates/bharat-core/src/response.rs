//! JSON response envelope.

use serde::Serialize;
use utoipa::ToSchema;

/// Envelope wrapping every response body: `{success, message, data}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response with the conventional `"ok"` message.
    pub fn ok(data: T) -> Self {
        Self::with_message("ok", data)
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful response carrying no data (`data: null`).
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
