//! Shared utilities and common types for the Authkeep workspace
//!
//! This crate provides common functionality used across all workspace members:
//! - Configuration types loaded from the environment
//! - Error response structures and stable error codes
//! - Common response type definitions

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, DatabaseConfig, Environment, LockoutConfig, TokenConfig};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use types::ApiResponse;
