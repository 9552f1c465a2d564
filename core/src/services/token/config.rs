//! Configuration for the token service

use ak_shared::config::TokenConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for signing access tokens
    pub secret: String,
    /// Access token expiry in minutes
    pub access_token_ttl_minutes: i64,
    /// Refresh credential expiry in days
    pub refresh_token_ttl_days: i64,
    /// Issuer claim embedded in access tokens
    pub issuer: String,
    /// Audience claim embedded in access tokens
    pub audience: String,
    /// Whether refresh credentials are rotated (single-use) on refresh
    pub rotate_on_refresh: bool,
    /// Maximum number of active refresh credentials per user
    pub max_sessions_per_user: usize,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            access_token_ttl_minutes: 15,
            refresh_token_ttl_days: 30,
            issuer: "authkeep".to_string(),
            audience: "authkeep-clients".to_string(),
            rotate_on_refresh: true,
            max_sessions_per_user: 5,
        }
    }
}

impl From<&TokenConfig> for TokenServiceConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            access_token_ttl_minutes: config.access_token_expiry / 60,
            refresh_token_ttl_days: config.refresh_token_expiry / 86_400,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            rotate_on_refresh: config.rotate_on_refresh,
            max_sessions_per_user: config.max_sessions_per_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TokenServiceConfig::default();
        assert_eq!(config.access_token_ttl_minutes, 15);
        assert_eq!(config.refresh_token_ttl_days, 30);
        assert_eq!(config.max_sessions_per_user, 5);
        assert!(config.rotate_on_refresh);
    }

    #[test]
    fn test_from_shared_config() {
        let shared = TokenConfig::new("secret")
            .with_access_expiry_minutes(10)
            .with_refresh_expiry_days(14);

        let config = TokenServiceConfig::from(&shared);
        assert_eq!(config.secret, "secret");
        assert_eq!(config.access_token_ttl_minutes, 10);
        assert_eq!(config.refresh_token_ttl_days, 14);
    }
}
