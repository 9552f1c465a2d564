//! Client-side error taxonomy
//!
//! Errors are cloneable so a single refresh failure can be fanned out to
//! every waiter that joined the in-flight call.

use thiserror::Error;

/// Errors surfaced by the refresh coordinator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No stored credentials; the caller must authenticate first
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The server rejected the refresh credential; re-login is required
    #[error("Refresh rejected by server")]
    RefreshRejected,

    /// The refresh call failed in transit
    #[error("Transport error: {0}")]
    Transport(String),
}
