//! Example walking a user through the full session lifecycle against MySQL
//!
//! Run with: cargo run --example session_lifecycle_demo
//!
//! Requires a reachable database; set DATABASE_URL in the environment or a
//! .env file.

use std::sync::Arc;

use ak_core::domain::entities::device::DeviceInfo;
use ak_core::domain::entities::user::User;
use ak_core::repositories::UserRepository;
use ak_core::services::auth::{AuthService, AuthServiceConfig};
use ak_core::services::token::{CredentialSweeper, SweeperConfig, TokenService, TokenServiceConfig};
use ak_infra::database::{DatabasePool, MySqlCredentialRepository, MySqlUserRepository};
use ak_infra::password::BcryptPasswordVerifier;
use ak_shared::config::{AuthConfig, DatabaseConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let pool = DatabasePool::new(DatabaseConfig::from_env()).await?;
    let auth_config = AuthConfig::from_env();

    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let token_service = Arc::new(TokenService::new(
        MySqlCredentialRepository::new(pool.get_pool().clone()),
        TokenServiceConfig::from(&auth_config.token),
    )?);
    let auth_service = AuthService::new(
        Arc::clone(&user_repository),
        token_service,
        Arc::new(BcryptPasswordVerifier::new()),
        AuthServiceConfig::from(&auth_config.lockout),
    );

    // Background sweep of expired credentials
    let sweeper = Arc::new(CredentialSweeper::new(
        Arc::new(MySqlCredentialRepository::new(pool.get_pool().clone())),
        SweeperConfig::default(),
    ));
    sweeper.start_background_task();

    // Provision a demo account
    let email = format!("demo-{}@example.com", uuid::Uuid::new_v4());
    let user = User::new(&email, BcryptPasswordVerifier::hash("hunter2")?);
    user_repository.create(user).await?;
    println!("created demo user {}", email);

    // Login
    let device = DeviceInfo::from_user_agent("Mozilla/5.0 (X11; Linux x86_64)", None);
    let session = auth_service.login(&email, "hunter2", device).await?;
    println!("logged in, access token expires in {}s", session.expires_in);

    // Authenticate a protected request
    let context = auth_service.authenticate(&session.access_token).await?;
    println!("authenticated as {} ({})", context.user.email, context.claims.role.as_str());

    // Refresh (rotates the credential by default)
    let refreshed = auth_service.refresh(&session.refresh_token).await?;
    println!("refreshed; rotation returned a new refresh token: {}", refreshed.refresh_token != session.refresh_token);

    // Logout everywhere
    let revoked = auth_service.logout_all(context.user.id).await?;
    println!("revoked {} session(s)", revoked);

    pool.close().await;
    Ok(())
}
