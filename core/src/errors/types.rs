//! Error taxonomy for session and token operations
//!
//! All variants are terminal for the presented credential: nothing here is
//! retried server-side. The client's only automatic recovery path is
//! refresh-on-access-expiry, never refresh-on-refresh-failure.

use ak_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account locked")]
    AccountLocked,

    #[error("Account deactivated")]
    AccountDeactivated,

    #[error("Password changed after token was issued")]
    PasswordChanged,

    /// Reported instead of leaking whether an account exists
    #[error("User not found")]
    UserNotFound,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed, expired, or wrong-signature access token. Expiry is not
    /// distinguished from tampering; callers wanting "probably expired" UX
    /// peek at the unverified payload, never at this error.
    #[error("Access token invalid")]
    TokenInvalid,

    /// Refresh credential missing, expired, or inactive
    #[error("Refresh token invalid")]
    RefreshInvalid,

    #[error("Token generation failed")]
    GenerationFailed,

    /// Signing secret absent at startup; never raised per call
    #[error("Token signing secret is not configured")]
    MissingSecret,
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::AccountLocked => error_codes::ACCOUNT_LOCKED,
            AuthError::AccountDeactivated => error_codes::ACCOUNT_DEACTIVATED,
            AuthError::PasswordChanged => error_codes::PASSWORD_CHANGED,
            AuthError::UserNotFound => error_codes::USER_NOT_FOUND,
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::TokenInvalid => error_codes::TOKEN_INVALID,
            TokenError::RefreshInvalid => error_codes::REFRESH_INVALID,
            TokenError::GenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
            TokenError::MissingSecret => error_codes::MISSING_SECRET,
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert DomainError to ErrorResponse
impl From<super::DomainError> for ErrorResponse {
    fn from(err: super::DomainError) -> Self {
        use super::DomainError;

        match err {
            DomainError::Auth(auth) => auth.into(),
            DomainError::Token(token) => token.into(),
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message)
            }
            DomainError::NotFound { resource } => ErrorResponse::new(
                error_codes::USER_NOT_FOUND,
                format!("Resource not found: {}", resource),
            ),
            DomainError::Internal { message } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, message)
            }
        }
    }
}
