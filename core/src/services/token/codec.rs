//! Stateless access-token codec
//!
//! Encoding and verification are pure functions of the signing secret; no
//! storage is consulted. A revocation list is deliberately not checked for
//! access tokens: a compromised access token stays valid until its short TTL
//! elapses.

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signs and verifies access tokens (HS256)
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    issuer: String,
    audience: String,
}

impl TokenCodec {
    /// Creates a new codec from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(TokenCodec)` - Ready to issue and verify
    /// * `Err(DomainError)` - The signing secret is missing; this is the only
    ///   failure mode and it surfaces at startup, never per call
    pub fn new(config: &TokenServiceConfig) -> Result<Self, DomainError> {
        if config.secret.trim().is_empty() {
            return Err(DomainError::Token(TokenError::MissingSecret));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl: Duration::minutes(config.access_token_ttl_minutes),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        })
    }

    /// Issues a signed access token carrying the user's current identity claims
    pub fn issue_access_token(&self, user: &User) -> Result<String, DomainError> {
        let claims = Claims::new_access(
            user.id,
            user.role,
            user.email_verified,
            self.access_ttl,
            &self.issuer,
            &self.audience,
        );
        self.encode(&claims)
    }

    /// Encodes claims into a signed token
    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }

    /// Verifies an access token and returns its claims
    ///
    /// Signature, issuer, audience, and expiry failures all collapse into one
    /// `TokenInvalid` kind. Callers never branch on *why* verification failed.
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::Token(TokenError::TokenInvalid))
    }

    /// Access token lifetime in seconds, for the `expires_in` response field
    pub fn expires_in_seconds(&self) -> i64 {
        self.access_ttl.num_seconds()
    }
}
