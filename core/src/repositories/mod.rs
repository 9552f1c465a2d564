//! Repository interfaces for the session subsystem.

pub mod credential;
pub mod user;

pub use credential::RefreshCredentialRepository;
pub use user::UserRepository;
