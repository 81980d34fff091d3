//! Registry endpoints

use crate::RegistryClient;
use crate::error::Result;
use hangar_core::domain::location::Location;
use hangar_core::domain::registry::Registry;
use hangar_core::dto::registry::{
    CreateRegistry, RegistryMutation, RegistryResponse, UpdateRegistry,
};

impl RegistryClient {
    // =============================================================================
    // Registry Management
    // =============================================================================

    /// Create the project's registry
    ///
    /// Activation is asynchronous; the returned mutation carries the operation
    /// to await.
    pub async fn create_registry(
        &self,
        location: &Location,
        req: &CreateRegistry,
    ) -> Result<RegistryMutation> {
        let url = format!("{}/registry", self.registry_url(location));
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Get the project's registry
    pub async fn get_registry(&self, location: &Location) -> Result<Registry> {
        let url = format!("{}/registry", self.registry_url(location));
        let response = self.client.get(&url).send().await?;

        let body: RegistryResponse = self.handle_response(response).await?;
        Ok(body.registry)
    }

    /// Update the project's registry
    ///
    /// Like creation, tier changes complete asynchronously.
    pub async fn update_registry(
        &self,
        location: &Location,
        req: &UpdateRegistry,
    ) -> Result<RegistryMutation> {
        let url = format!("{}/registry", self.registry_url(location));
        let response = self.client.patch(&url).json(req).send().await?;

        self.handle_response(response).await
    }
}
