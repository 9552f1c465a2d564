//! # Authkeep Client
//!
//! Consuming-side session plumbing: a single-flight refresh coordinator that
//! guarantees at most one refresh call is in flight per client instance, with
//! every concurrent caller sharing its outcome.

pub mod coordinator;
pub mod credentials;
pub mod error;
pub mod expiry;
pub mod refresher;

// Re-export commonly used types
pub use coordinator::{CoordinatorConfig, RefreshCoordinator};
pub use credentials::{CredentialStore, InMemoryCredentialStore, StoredCredentials};
pub use error::ClientError;
pub use expiry::decoded_expiry;
pub use refresher::TokenRefresher;
