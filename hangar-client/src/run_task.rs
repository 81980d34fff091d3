//! Run-task credential endpoints

use crate::RegistryClient;
use crate::error::Result;
use hangar_core::domain::location::Location;
use hangar_core::domain::run_task::RunTaskCredential;
use hangar_core::dto::run_task::RunTaskResponse;

impl RegistryClient {
    // =============================================================================
    // Run Task
    // =============================================================================

    /// Read the registry's run-task endpoint and HMAC key
    pub async fn get_run_task(&self, location: &Location) -> Result<RunTaskCredential> {
        let url = format!("{}/registry/run-task", self.registry_url(location));
        let response = self.client.get(&url).send().await?;

        let body: RunTaskResponse = self.handle_response(response).await?;
        Ok(body.into())
    }

    /// Issue a fresh HMAC key, invalidating the previous one
    pub async fn regenerate_run_task_hmac(
        &self,
        location: &Location,
    ) -> Result<RunTaskCredential> {
        let url = format!("{}/registry/run-task/regenerate", self.registry_url(location));
        let response = self.client.post(&url).send().await?;

        let body: RunTaskResponse = self.handle_response(response).await?;
        Ok(body.into())
    }
}
