//! # Authkeep Infrastructure Layer
//!
//! Concrete implementations behind the core repository and service traits:
//!
//! - **Database**: MySQL repositories using SQLx
//! - **Password**: bcrypt-backed password verification

pub mod database;
pub mod password;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
