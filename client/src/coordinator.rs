//! Single-flight refresh coordinator
//!
//! Prevents N concurrent requests that each discover an expired access token
//! from firing N simultaneous refresh calls, which would race against
//! server-side rotation and invalidate each other.
//!
//! The coordinator is an explicit state machine (`Idle -> Refreshing`) with a
//! waiter list, instantiated per client/session with injected dependencies;
//! there is no module-level state.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};

use crate::credentials::{CredentialStore, StoredCredentials};
use crate::error::ClientError;
use crate::expiry::decoded_expiry;
use crate::refresher::TokenRefresher;

/// Configuration for the refresh coordinator
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Safety margin in seconds: tokens expiring within this window are
    /// refreshed ahead of time
    pub refresh_margin_seconds: i64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            refresh_margin_seconds: 300, // 5 minutes
        }
    }
}

/// Shared outcome of one refresh flight
type FlightResult = Result<String, ClientError>;

struct FlightState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<FlightResult>>,
}

/// Single-flight coordinator over a refresh transport and a credential store
pub struct RefreshCoordinator<T: TokenRefresher, S: CredentialStore> {
    refresher: T,
    store: S,
    config: CoordinatorConfig,
    state: Mutex<FlightState>,
}

impl<T: TokenRefresher, S: CredentialStore> RefreshCoordinator<T, S> {
    /// Create a new coordinator with default configuration
    pub fn new(refresher: T, store: S) -> Self {
        Self::with_config(refresher, store, CoordinatorConfig::default())
    }

    /// Create a new coordinator with explicit configuration
    pub fn with_config(refresher: T, store: S, config: CoordinatorConfig) -> Self {
        Self {
            refresher,
            store,
            config,
            state: Mutex::new(FlightState {
                refreshing: false,
                waiters: Vec::new(),
            }),
        }
    }

    /// Returns an access token that is valid for at least the safety margin
    ///
    /// - Token comfortably inside its lifetime: returned immediately, no
    ///   suspension.
    /// - A refresh already in flight: the caller suspends until that shared
    ///   flight resolves; it does not initiate a second refresh.
    /// - Otherwise this caller becomes the leader, performs the one network
    ///   call, and fans the outcome out to every waiter.
    ///
    /// All callers overlapping one flight observe the same token or the same
    /// error, never a mix.
    ///
    /// # Errors
    ///
    /// * `NotAuthenticated` - No stored credentials
    /// * `RefreshRejected` / `Transport` - The shared flight failed; stored
    ///   credentials have been cleared and re-login is required
    pub async fn ensure_valid_token(&self) -> FlightResult {
        let credentials = self.store.load().ok_or(ClientError::NotAuthenticated)?;

        if !self.needs_refresh(&credentials.access_token) {
            return Ok(credentials.access_token);
        }

        // Join an in-flight refresh or claim leadership.
        let waiter = {
            let mut state = self.state.lock().await;
            if state.refreshing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                Some(rx)
            } else {
                state.refreshing = true;
                None
            }
        };

        if let Some(rx) = waiter {
            debug!("awaiting in-flight refresh");
            return rx
                .await
                .unwrap_or_else(|_| Err(ClientError::Transport("refresh abandoned".to_string())));
        }

        // Leader path. Re-read the store: a flight that completed between our
        // expiry check and claiming leadership already renewed the token.
        let outcome = match self.store.load() {
            None => Err(ClientError::NotAuthenticated),
            Some(current) if !self.needs_refresh(&current.access_token) => {
                Ok(current.access_token)
            }
            Some(current) => self.run_refresh(&current.refresh_token).await,
        };

        self.finish_flight(&outcome).await;
        outcome
    }

    /// Spawns a background task that keeps the token fresh proactively
    ///
    /// The timer drives the same coordinator path, so interactive callers
    /// rarely observe the suspension branch in practice.
    pub fn spawn_proactive_refresh(
        self: &Arc<Self>,
        interval: std::time::Duration,
    ) -> tokio::task::JoinHandle<()>
    where
        T: 'static,
        S: 'static,
    {
        let coordinator = Arc::clone(self);

        tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so spawning does not
            // race the initial login.
            timer.tick().await;

            loop {
                timer.tick().await;

                match coordinator.store.load() {
                    None => continue,
                    Some(credentials) => {
                        if !coordinator.needs_refresh(&credentials.access_token) {
                            continue;
                        }
                    }
                }

                if let Err(e) = coordinator.ensure_valid_token().await {
                    warn!("proactive refresh failed: {}", e);
                }
            }
        })
    }

    fn needs_refresh(&self, access_token: &str) -> bool {
        // An unreadable payload counts as expired; the server remains the
        // authority either way.
        match decoded_expiry(access_token) {
            Some(exp) => exp - Utc::now().timestamp() <= self.config.refresh_margin_seconds,
            None => true,
        }
    }

    async fn run_refresh(&self, refresh_token: &str) -> FlightResult {
        match self.refresher.refresh(refresh_token).await {
            Ok(pair) => {
                let access_token = pair.access_token.clone();
                self.store.store(StoredCredentials {
                    access_token: pair.access_token,
                    refresh_token: pair.refresh_token,
                });
                debug!("refresh flight succeeded");
                Ok(access_token)
            }
            Err(e) => {
                // Forced logout: a failed refresh clears local credentials so
                // every caller converges on re-authentication.
                self.store.clear();
                warn!("refresh flight failed, credentials cleared: {}", e);
                Err(e)
            }
        }
    }

    async fn finish_flight(&self, outcome: &FlightResult) {
        let waiters = {
            let mut state = self.state.lock().await;
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };

        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }
}
