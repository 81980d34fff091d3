//! Iteration endpoints

use crate::error::Result;
use crate::{RegistryClient, page_query};
use hangar_core::domain::iteration::{Iteration, IterationRef};
use hangar_core::domain::location::Location;
use hangar_core::dto::iteration::{
    CreateIteration, IterationResponse, ListIterationsResponse, UpdateIteration,
};
use hangar_core::dto::pagination::Page;

impl RegistryClient {
    // =============================================================================
    // Iteration Management
    // =============================================================================

    /// Create an iteration in a bucket
    ///
    /// # Arguments
    /// * `location` - Location of the registry
    /// * `bucket_slug` - Bucket that owns the iteration
    /// * `req` - The iteration creation request
    ///
    /// # Returns
    /// The created iteration; fails with a conflict if the fingerprint is taken
    pub async fn create_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        req: &CreateIteration,
    ) -> Result<Iteration> {
        let url = format!("{}/iterations", self.bucket_url(location, bucket_slug));
        let response = self.client.post(&url).json(req).send().await?;

        let body: IterationResponse = self.handle_response(response).await?;
        Ok(body.iteration)
    }

    /// Get an iteration by id, fingerprint or incremental version
    pub async fn get_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration: &IterationRef,
    ) -> Result<Iteration> {
        let url = format!("{}/iteration", self.bucket_url(location, bucket_slug));
        let query = match iteration {
            IterationRef::Id(id) => ("iteration_id", id.clone()),
            IterationRef::Fingerprint(fingerprint) => ("fingerprint", fingerprint.clone()),
            IterationRef::IncrementalVersion(version) => {
                ("incremental_version", version.to_string())
            }
        };

        let response = self.client.get(&url).query(&[query]).send().await?;

        let body: IterationResponse = self.handle_response(response).await?;
        Ok(body.iteration)
    }

    /// List one page of a bucket's iterations
    pub async fn list_iterations(
        &self,
        location: &Location,
        bucket_slug: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Iteration>> {
        let url = format!("{}/iterations", self.bucket_url(location, bucket_slug));
        let response = self
            .client
            .get(&url)
            .query(&page_query(page_token))
            .send()
            .await?;

        let body: ListIterationsResponse = self.handle_response(response).await?;
        Ok(body.into())
    }

    /// Update an iteration
    ///
    /// # Arguments
    /// * `location` - Location of the registry
    /// * `bucket_slug` - Bucket that owns the iteration
    /// * `iteration_id` - Generated id of the iteration (not its fingerprint)
    /// * `req` - Fields to change
    pub async fn update_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        req: &UpdateIteration,
    ) -> Result<Iteration> {
        let url = format!(
            "{}/iterations/{}",
            self.bucket_url(location, bucket_slug),
            iteration_id
        );
        let response = self.client.patch(&url).json(req).send().await?;

        let body: IterationResponse = self.handle_response(response).await?;
        Ok(body.iteration)
    }

    /// Delete an iteration by its generated id
    pub async fn delete_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
    ) -> Result<()> {
        let url = format!(
            "{}/iterations/{}",
            self.bucket_url(location, bucket_slug),
            iteration_id
        );
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }
}
