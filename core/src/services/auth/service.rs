//! Main authentication service implementation

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::device::DeviceInfo;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthResponse, AuthenticatedUser, SessionInfo};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{RefreshCredentialRepository, UserRepository};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::PasswordVerifier;

/// Authentication service orchestrating the complete session lifecycle
pub struct AuthService<U, R, P>
where
    U: UserRepository,
    R: RefreshCredentialRepository,
    P: PasswordVerifier,
{
    /// User repository for account reads and lockout bookkeeping
    user_repository: Arc<U>,
    /// Token service for pair issuance, refresh, and revocation
    token_service: Arc<TokenService<R>>,
    /// Password verification seam
    password_verifier: Arc<P>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, R, P> AuthService<U, R, P>
where
    U: UserRepository,
    R: RefreshCredentialRepository,
    P: PasswordVerifier,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<R>>,
        password_verifier: Arc<P>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            password_verifier,
            config,
        }
    }

    /// Authenticate with email and password, returning a fresh session
    ///
    /// The lock check runs before the password check: during the lock window
    /// even the correct password is rejected with `AccountLocked`.
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials` - Unknown email or wrong password (one error,
    ///   no account enumeration)
    /// * `AccountLocked` - Too many recent failures
    /// * `AccountDeactivated` - The account is disabled
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        device: DeviceInfo,
    ) -> DomainResult<AuthResponse> {
        let mut user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("login attempt for unknown email");
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        if user.is_locked() {
            warn!(user_id = %user.id, "login attempt while account locked");
            return Err(DomainError::Auth(AuthError::AccountLocked));
        }

        if !user.is_active {
            return Err(DomainError::Auth(AuthError::AccountDeactivated));
        }

        if !self.password_verifier.verify(password, &user.password_hash)? {
            user.record_failed_login(
                self.config.max_failed_logins,
                Duration::minutes(self.config.lock_duration_minutes),
            );
            if user.is_locked() {
                warn!(
                    user_id = %user.id,
                    attempts = user.failed_login_attempts,
                    "account locked after repeated failed logins"
                );
            }
            self.user_repository.update(user).await?;
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        user.reset_login_failures();
        user.update_last_login();
        let user = self.user_repository.update(user).await?;

        self.establish_session(&user, device).await
    }

    /// Issue a session for an already-authenticated user
    ///
    /// Entry point for the registration and OAuth flows, which authenticate
    /// through their own means and then call here.
    pub async fn establish_session(
        &self,
        user: &User,
        device: DeviceInfo,
    ) -> DomainResult<AuthResponse> {
        let pair = self.token_service.issue_pair(user, device).await?;
        info!(user_id = %user.id, "session established");
        Ok(AuthResponse::from_parts(pair, user))
    }

    /// Verify an access token for a protected request
    ///
    /// Runs the full check sequence: signature/claims, user existence,
    /// account active, account not locked, password unchanged since issuance.
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<AuthenticatedUser> {
        let claims = self.token_service.verify_access_token(access_token)?;

        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::TokenInvalid))?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        if !user.is_active {
            return Err(DomainError::Auth(AuthError::AccountDeactivated));
        }

        if user.is_locked() {
            return Err(DomainError::Auth(AuthError::AccountLocked));
        }

        if user.changed_password_after(claims.iat) {
            debug!(user_id = %user.id, "rejected token issued before password change");
            return Err(DomainError::Auth(AuthError::PasswordChanged));
        }

        Ok(AuthenticatedUser { user, claims })
    }

    /// Exchange a refresh token for a new session
    ///
    /// Role and email-verified state are re-read from storage here; this is
    /// the only point where such changes propagate without a full re-login.
    ///
    /// # Errors
    ///
    /// * `RefreshInvalid` - Credential missing, expired, inactive, or the
    ///   owner no longer exists
    /// * `AccountDeactivated` - The owning account is disabled
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        let credential = self.token_service.lookup_refresh(refresh_token).await?;

        // A missing owner reads as an invalid credential, not as information
        // about account existence.
        let user = self
            .user_repository
            .find_by_id(credential.user_id)
            .await?
            .ok_or(DomainError::Token(TokenError::RefreshInvalid))?;

        if !user.is_active {
            return Err(DomainError::Auth(AuthError::AccountDeactivated));
        }

        let pair = self.token_service.refresh_pair(refresh_token, &user).await?;
        Ok(AuthResponse::from_parts(pair, &user))
    }

    /// Invalidate a single refresh credential (logout)
    ///
    /// Idempotent: logging out an already-inactive or unknown credential is
    /// not an error.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        let revoked = self.token_service.revoke_refresh_token(refresh_token).await?;
        debug!(revoked, "logout processed");
        Ok(())
    }

    /// Invalidate every refresh credential for a user (sign out everywhere)
    pub async fn logout_all(&self, user_id: Uuid) -> DomainResult<usize> {
        self.token_service.revoke_all_for_user(user_id).await
    }

    /// Password-change hook
    ///
    /// Stamps `password_changed_at` and revokes all refresh credentials.
    /// Outstanding access tokens stay valid until their short TTL expires;
    /// that bounded window is accepted by design.
    pub async fn on_password_changed(&self, user_id: Uuid) -> DomainResult<usize> {
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        user.mark_password_changed();
        self.user_repository.update(user).await?;

        let revoked = self.logout_all(user_id).await?;
        info!(user_id = %user_id, revoked, "password changed, sessions revoked");
        Ok(revoked)
    }

    /// List the user's active sessions for device-management surfaces
    pub async fn active_sessions(&self, user_id: Uuid) -> DomainResult<Vec<SessionInfo>> {
        let credentials = self.token_service.active_credentials(user_id).await?;
        Ok(credentials.iter().map(SessionInfo::from).collect())
    }
}
