//! Build endpoints

use crate::error::Result;
use crate::{RegistryClient, page_query};
use hangar_core::domain::build::Build;
use hangar_core::domain::location::Location;
use hangar_core::dto::build::{BuildResponse, CreateBuild, ListBuildsResponse, UpdateBuild};
use hangar_core::dto::pagination::Page;

impl RegistryClient {
    // =============================================================================
    // Build Management
    // =============================================================================

    fn builds_url(&self, location: &Location, bucket_slug: &str, iteration_id: &str) -> String {
        format!(
            "{}/iterations/{}/builds",
            self.bucket_url(location, bucket_slug),
            iteration_id
        )
    }

    /// Create a build in an iteration
    ///
    /// The service rejects the creation with `ABORTED` when another run has
    /// already claimed the same component for this iteration.
    pub async fn create_build(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        req: &CreateBuild,
    ) -> Result<Build> {
        let url = self.builds_url(location, bucket_slug, iteration_id);
        let response = self.client.post(&url).json(req).send().await?;

        let body: BuildResponse = self.handle_response(response).await?;
        Ok(body.build)
    }

    /// Update a build's status, images or labels
    pub async fn update_build(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        build_id: &str,
        req: &UpdateBuild,
    ) -> Result<Build> {
        let url = format!(
            "{}/{}",
            self.builds_url(location, bucket_slug, iteration_id),
            build_id
        );
        let response = self.client.patch(&url).json(req).send().await?;

        let body: BuildResponse = self.handle_response(response).await?;
        Ok(body.build)
    }

    /// List one page of an iteration's builds
    pub async fn list_builds(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Build>> {
        let url = self.builds_url(location, bucket_slug, iteration_id);
        let response = self
            .client
            .get(&url)
            .query(&page_query(page_token))
            .send()
            .await?;

        let body: ListBuildsResponse = self.handle_response(response).await?;
        Ok(body.into())
    }
}
