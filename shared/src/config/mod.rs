//! Configuration types for the Authkeep services
//!
//! Each configuration struct can be built programmatically or loaded from
//! environment variables via its `from_env` constructor.

pub mod auth;
pub mod database;
pub mod environment;

pub use auth::{AuthConfig, LockoutConfig, TokenConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
