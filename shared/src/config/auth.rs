//! Authentication and token lifecycle configuration

use serde::{Deserialize, Serialize};

/// Token signing and session policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Secret key for signing access tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh credential expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Token issuer claim
    pub issuer: String,

    /// Token audience claim
    pub audience: String,

    /// Whether refresh credentials are rotated (single-use) on refresh
    #[serde(default = "default_rotation")]
    pub rotate_on_refresh: bool,

    /// Maximum number of active refresh credentials per user
    #[serde(default = "default_session_quota")]
    pub max_sessions_per_user: usize,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            access_token_expiry: 900,        // 15 minutes
            refresh_token_expiry: 2_592_000, // 30 days
            issuer: String::from("authkeep"),
            audience: String::from("authkeep-clients"),
            rotate_on_refresh: default_rotation(),
            max_sessions_per_user: default_session_quota(),
        }
    }
}

impl TokenConfig {
    /// Create a new token configuration with a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh credential expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86_400;
        self
    }

    /// Set the per-user session quota
    pub fn with_session_quota(mut self, quota: usize) -> Self {
        self.max_sessions_per_user = quota;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }
}

/// Failed-login lockout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockoutConfig {
    /// Consecutive failed login attempts before the account is locked
    pub max_failed_logins: u32,

    /// Duration in seconds for which a locked account stays locked
    pub lock_duration_seconds: u64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_logins: 5,
            lock_duration_seconds: 1800, // 30 minutes
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token signing and session policy configuration
    pub token: TokenConfig,

    /// Failed-login lockout configuration
    #[serde(default)]
    pub lockout: LockoutConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("TOKEN_SECRET")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());
        let access_token_expiry = std::env::var("ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .unwrap_or(900);
        let refresh_token_expiry = std::env::var("REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "2592000".to_string())
            .parse()
            .unwrap_or(2_592_000);
        let rotate_on_refresh = std::env::var("REFRESH_TOKEN_ROTATION")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);
        let max_sessions_per_user = std::env::var("MAX_SESSIONS_PER_USER")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);

        Self {
            token: TokenConfig {
                secret,
                access_token_expiry,
                refresh_token_expiry,
                rotate_on_refresh,
                max_sessions_per_user,
                ..Default::default()
            },
            lockout: LockoutConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            lockout: LockoutConfig::default(),
        }
    }
}

fn default_rotation() -> bool {
    true
}

fn default_session_quota() -> usize {
    5
}
