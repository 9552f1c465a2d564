//! Generic response envelope for RPC-style operations.

use serde::{Deserialize, Serialize};

use crate::errors::ErrorResponse;

/// Uniform envelope wrapping either a payload or an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,

    /// Payload when the operation succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error information when the operation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    /// Wrap a successful payload
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wrap a failed operation
    pub fn err(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}
