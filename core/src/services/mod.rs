//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, PasswordVerifier};
pub use token::{
    CredentialSweeper, SweeperConfig, TokenCodec, TokenService, TokenServiceConfig,
};
