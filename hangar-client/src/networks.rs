//! Network endpoints

use crate::RegistryClient;
use crate::error::{ClientError, Result};
use hangar_core::domain::location::Location;
use hangar_core::domain::network::Network;
use hangar_core::dto::network::NetworkResponse;

impl RegistryClient {
    // =============================================================================
    // Networks
    // =============================================================================

    /// Get a network by id
    ///
    /// The network service is regional, so `location` must carry a region.
    pub async fn get_network(&self, location: &Location, network_id: &str) -> Result<Network> {
        let region = location.region.as_ref().ok_or_else(|| {
            ClientError::InvalidRequest(format!(
                "network lookup requires a region ({})",
                location
            ))
        })?;

        let url = format!("{}/networks/{}", self.network_url(location), network_id);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("location.region.provider", region.provider.as_str()),
                ("location.region.region", region.region.as_str()),
            ])
            .send()
            .await?;

        let body: NetworkResponse = self.handle_response(response).await?;
        Ok(body.network)
    }
}
