//! Configuration for the authentication service

use ak_shared::config::LockoutConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Consecutive failed login attempts before the account is locked
    pub max_failed_logins: u32,
    /// How long a locked account stays locked, in minutes
    pub lock_duration_minutes: i64,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            max_failed_logins: 5,
            lock_duration_minutes: 30,
        }
    }
}

impl From<&LockoutConfig> for AuthServiceConfig {
    fn from(config: &LockoutConfig) -> Self {
        Self {
            max_failed_logins: config.max_failed_logins,
            lock_duration_minutes: (config.lock_duration_seconds / 60) as i64,
        }
    }
}
