//! Network refresh seam

use async_trait::async_trait;

use ak_core::domain::entities::token::TokenPair;

use crate::error::ClientError;

/// Performs the actual refresh call against the server
///
/// The coordinator injects this so transports (HTTP client, RPC stub, test
/// double) stay swappable.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Exchange a refresh token for a new token pair
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ClientError>;
}
