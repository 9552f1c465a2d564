//! MySQL repository implementations.

pub mod credential_repository;
pub mod user_repository;

pub use credential_repository::MySqlCredentialRepository;
pub use user_repository::MySqlUserRepository;
