//! Main token service implementation
//!
//! Orchestrates access/refresh pair issuance, refresh with optional rotation,
//! and revocation against the credential repository.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::device::DeviceInfo;
use crate::domain::entities::token::{Claims, RefreshCredential, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::RefreshCredentialRepository;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Length of the opaque refresh token string
const REFRESH_TOKEN_LENGTH: usize = 48;

/// Hashes an opaque refresh token for storage and lookup
pub(crate) fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Service for managing access tokens and refresh credentials
pub struct TokenService<R: RefreshCredentialRepository> {
    pub(crate) repository: R,
    codec: TokenCodec,
    config: TokenServiceConfig,
    // Serializes issuance per user so two simultaneous logins cannot both see
    // room under the session quota.
    user_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl<R: RefreshCredentialRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Credential repository for persistence
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an error when the signing secret is missing
    pub fn new(repository: R, config: TokenServiceConfig) -> Result<Self, DomainError> {
        let codec = TokenCodec::new(&config)?;

        Ok(Self {
            repository,
            codec,
            config,
            user_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Issues a new access/refresh pair for a user
    ///
    /// Invoked post-authentication by login, registration, and OAuth flows.
    /// Creates exactly one new refresh credential; sessions beyond the
    /// per-user quota silently stop working, oldest first.
    pub async fn issue_pair(
        &self,
        user: &User,
        device: DeviceInfo,
    ) -> Result<TokenPair, DomainError> {
        let access_token = self.codec.issue_access_token(user)?;
        let refresh_token = self.create_refresh_credential(user.id, device).await?;

        info!(user_id = %user.id, "issued token pair");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.codec.expires_in_seconds(),
        ))
    }

    /// Verifies an access token and returns the claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.codec.verify(token)
    }

    /// Looks up the credential a presented refresh token resolves to
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshCredential)` - The credential is active and unexpired
    /// * `Err(TokenError::RefreshInvalid)` - Missing, expired, or inactive
    pub async fn lookup_refresh(&self, refresh_token: &str) -> Result<RefreshCredential, DomainError> {
        let token_hash = hash_refresh_token(refresh_token);

        self.repository
            .find_active(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::RefreshInvalid))
    }

    /// Exchanges a refresh token for a new pair
    ///
    /// The caller supplies the owning user read fresh from storage; this is
    /// the only point where role or verification changes propagate into
    /// claims without a full re-login.
    ///
    /// Under rotation the presented credential is deactivated with a
    /// conditional update: of two racing refreshes, exactly one wins and the
    /// other observes `RefreshInvalid`.
    pub async fn refresh_pair(
        &self,
        refresh_token: &str,
        user: &User,
    ) -> Result<TokenPair, DomainError> {
        let token_hash = hash_refresh_token(refresh_token);

        let credential = self
            .repository
            .find_active(&token_hash)
            .await?
            .ok_or(DomainError::Token(TokenError::RefreshInvalid))?;

        // Stamp last-used; a false return means the credential died between
        // lookup and now.
        if !self.repository.touch(credential.id, Utc::now()).await? {
            return Err(DomainError::Token(TokenError::RefreshInvalid));
        }

        let access_token = self.codec.issue_access_token(user)?;

        if self.config.rotate_on_refresh {
            // Single-use: only the caller that flips the active flag may mint
            // the replacement.
            if !self.repository.deactivate(&token_hash).await? {
                return Err(DomainError::Token(TokenError::RefreshInvalid));
            }

            let replacement = self
                .create_refresh_credential(credential.user_id, credential.device.clone())
                .await?;

            debug!(user_id = %credential.user_id, "rotated refresh credential");

            Ok(TokenPair::new(
                access_token,
                replacement,
                self.codec.expires_in_seconds(),
            ))
        } else {
            Ok(TokenPair::new(
                access_token,
                refresh_token.to_string(),
                self.codec.expires_in_seconds(),
            ))
        }
    }

    /// Revokes a specific refresh credential
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - This call deactivated the credential
    /// * `Ok(false)` - Credential absent or already inactive (not an error)
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<bool, DomainError> {
        let token_hash = hash_refresh_token(refresh_token);
        self.repository.deactivate(&token_hash).await
    }

    /// Revokes every active credential for a user
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let revoked = self.repository.deactivate_all_for_user(user_id).await?;
        info!(user_id = %user_id, revoked, "revoked all refresh credentials");
        Ok(revoked)
    }

    /// Lists the user's active credentials, newest first
    pub async fn active_credentials(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RefreshCredential>, DomainError> {
        self.repository.find_active_for_user(user_id).await
    }

    /// Creates and stores one refresh credential, enforcing the quota
    ///
    /// Runs under a per-user lock: evicts the user's expired/inactive rows,
    /// deactivates the oldest active rows beyond the quota, then inserts the
    /// fresh credential.
    async fn create_refresh_credential(
        &self,
        user_id: Uuid,
        device: DeviceInfo,
    ) -> Result<String, DomainError> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        self.repository.prune_for_user(user_id).await?;

        let active = self.repository.find_active_for_user(user_id).await?;
        let quota = self.config.max_sessions_per_user.max(1);
        if active.len() >= quota {
            // Keep the newest quota-1 so the new credential fits underneath
            // the limit; deactivate the rest, oldest included.
            for stale in active.iter().skip(quota - 1) {
                self.repository.deactivate(&stale.token_hash).await?;
            }
            debug!(
                user_id = %user_id,
                evicted = active.len() - (quota - 1),
                "evicted refresh credentials beyond session quota"
            );
        }

        let token_string: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(REFRESH_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let credential = RefreshCredential::new(
            user_id,
            hash_refresh_token(&token_string),
            device,
            Duration::days(self.config.refresh_token_ttl_days),
        );

        self.repository
            .save(credential)
            .await
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))?;

        Ok(token_string)
    }

    async fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
