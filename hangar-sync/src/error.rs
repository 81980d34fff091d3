//! Error types for registry reconciliation

use std::time::Duration;

use hangar_client::ClientError;
use hangar_core::domain::operation::OperationState;
use thiserror::Error;

/// Result type alias for reconciliation operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors surfaced by the reconciler and its collaborators
///
/// Benign conflicts never appear here: they are resolved by a compensating
/// read before control returns to the caller.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote service rejected a call, or the call never reached it
    #[error(transparent)]
    Client(#[from] ClientError),

    /// An operation has not finished yet
    ///
    /// Only ever seen as the last transient condition inside [`SyncError::Timeout`].
    #[error("operation {operation_id} is still {state}")]
    OperationPending {
        operation_id: String,
        state: OperationState,
    },

    /// An operation finished with an embedded error
    #[error("operation \"{description}\" failed (code {code}): {message}")]
    OperationFailed {
        description: String,
        code: i32,
        message: String,
    },

    /// The poller gave up before the condition cleared
    #[error("gave up after {attempts} attempt(s) over {elapsed:?}: {last}")]
    Timeout {
        attempts: u32,
        elapsed: Duration,
        last: Box<SyncError>,
    },

    /// The service answered with something the protocol does not allow
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A listing never cleared its cursor
    #[error("listing did not finish within {0} pages")]
    PaginationLimitExceeded(usize),

    /// Invalid poller or reconciler settings
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SyncError {
    /// Check if the underlying remote error is a "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Client(err) if err.is_not_found())
    }
}
