//! Operation tracker
//!
//! Blocks until a long-running remote operation completes, polling the
//! service's wait endpoint under the backoff poller.

use std::sync::Arc;
use std::time::Duration;

use hangar_client::RegistryApi;
use hangar_core::domain::location::Location;
use hangar_core::domain::operation::{Operation, OperationState};
use tracing::info;

use crate::backoff::{BackoffError, RetryFailure, RetryPolicy, retry};
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};

/// Awaits long-running operations
pub struct OperationTracker<A: ?Sized> {
    api: Arc<A>,
    policy: RetryPolicy,
    wait_timeout: Duration,
}

impl<A: RegistryApi + ?Sized> OperationTracker<A> {
    /// Creates a tracker using the poller settings of `config`
    ///
    /// Fails with [`SyncError::InvalidConfig`] when the settings do not validate.
    pub fn new(api: Arc<A>, config: &SyncConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            api,
            policy: config.retry_policy.clone(),
            wait_timeout: config.operation_wait_timeout,
        })
    }

    /// Waits for an operation to reach `DONE`
    ///
    /// # Arguments
    /// * `location` - Location the operation runs in
    /// * `operation_id` - Id of the operation
    /// * `description` - Human-readable name used in progress logs
    ///
    /// # Returns
    /// The finished operation. An operation that carries an error, reports an
    /// unknown state, or cannot be fetched fails immediately; one still
    /// pending when the poller gives up fails with [`SyncError::Timeout`].
    pub async fn wait(
        &self,
        location: &Location,
        operation_id: &str,
        description: &str,
    ) -> Result<Operation> {
        let api = self.api.as_ref();
        let timeout = self.wait_timeout;

        let outcome = retry(&self.policy, move || async move {
            let operation = api
                .wait_operation(location, operation_id, timeout)
                .await
                .map_err(|e| BackoffError::Permanent(SyncError::from(e)))?;
            classify(operation, description)
        })
        .await;

        match outcome {
            Ok(operation) => {
                info!("==> Operation \"{}\" done", description);
                Ok(operation)
            }
            Err(RetryFailure::Permanent(err)) => Err(err),
            Err(RetryFailure::Exhausted {
                last,
                attempts,
                elapsed,
            }) => Err(SyncError::Timeout {
                attempts,
                elapsed,
                last: Box::new(last),
            }),
        }
    }
}

/// Sorts one wait response into done, still going, or fatal
fn classify(
    operation: Operation,
    description: &str,
) -> std::result::Result<Operation, BackoffError<SyncError>> {
    if let Some(failure) = &operation.error {
        return Err(BackoffError::Permanent(SyncError::OperationFailed {
            description: description.to_string(),
            code: failure.code,
            message: failure.message.clone(),
        }));
    }

    match &operation.state {
        OperationState::Done => Ok(operation),
        OperationState::Pending | OperationState::Running => {
            let progress = if operation.state == OperationState::Pending {
                "pending"
            } else {
                "running"
            };
            info!("==> Operation \"{}\" {}...", description, progress);
            Err(BackoffError::Transient(SyncError::OperationPending {
                operation_id: operation.id.clone(),
                state: operation.state.clone(),
            }))
        }
        OperationState::Unknown(state) => Err(BackoffError::Permanent(
            SyncError::MalformedResponse(format!(
                "operation {} reported unknown state {:?}",
                operation.id, state
            )),
        )),
    }
}
