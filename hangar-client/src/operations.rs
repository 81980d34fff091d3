//! Operation endpoints

use std::time::Duration;

use crate::error::Result;
use crate::{OPERATION_WAIT_GRACE, RegistryClient};
use hangar_core::domain::location::Location;
use hangar_core::domain::operation::Operation;
use hangar_core::dto::operation::OperationResponse;

impl RegistryClient {
    // =============================================================================
    // Operations
    // =============================================================================

    /// Wait on a long-running operation
    ///
    /// The service holds the request open for up to `timeout` and then answers
    /// with the operation's current state, which need not be `DONE`. The HTTP
    /// request itself is allowed a short grace period on top of that.
    ///
    /// # Arguments
    /// * `location` - Location the operation runs in
    /// * `operation_id` - Id of the operation
    /// * `timeout` - Server-side wait timeout
    pub async fn wait_operation(
        &self,
        location: &Location,
        operation_id: &str,
        timeout: Duration,
    ) -> Result<Operation> {
        let url = format!(
            "{}/operations/{}/wait",
            self.operation_url(location),
            operation_id
        );
        let response = self
            .client
            .get(&url)
            .query(&[("timeout", format!("{}s", timeout.as_secs()))])
            .timeout(timeout + OPERATION_WAIT_GRACE)
            .send()
            .await?;

        let body: OperationResponse = self.handle_response(response).await?;
        Ok(body.operation)
    }
}
