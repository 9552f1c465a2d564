//! Background sweep of expired refresh credentials
//!
//! Expired rows are never deleted synchronously by request handlers; this
//! sweeper is the time-based mechanism that garbage-collects them.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::RefreshCredentialRepository;

/// Configuration for the credential sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable the background sweep
    pub enabled: bool,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service for sweeping expired refresh credentials
pub struct CredentialSweeper<R: RefreshCredentialRepository + 'static> {
    repository: Arc<R>,
    config: SweeperConfig,
}

impl<R: RefreshCredentialRepository> CredentialSweeper<R> {
    /// Create a new credential sweeper
    pub fn new(repository: Arc<R>, config: SweeperConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single sweep cycle
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of expired credentials deleted
    /// * `Err(DomainError)` - If the sweep fails
    pub async fn run_sweep(&self) -> Result<usize, DomainError> {
        if !self.config.enabled {
            return Ok(0);
        }

        let deleted = self.repository.delete_expired().await?;
        if deleted > 0 {
            info!(deleted, "swept expired refresh credentials");
        }

        Ok(deleted)
    }

    /// Start the sweeper as a background task
    ///
    /// Spawns a tokio task that runs the sweep at regular intervals.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("credential sweeper is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "credential sweeper started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_sweep().await {
                    error!("credential sweep cycle failed: {}", e);
                }
            }
        });
    }
}
