//! Bucket endpoints

use crate::error::Result;
use crate::{RegistryClient, page_query};
use hangar_core::domain::bucket::Bucket;
use hangar_core::domain::location::Location;
use hangar_core::dto::bucket::{
    BucketResponse, CreateBucket, CreateBucketResponse, ListBucketsResponse,
};
use hangar_core::dto::pagination::Page;

impl RegistryClient {
    // =============================================================================
    // Bucket Management
    // =============================================================================

    /// Create a bucket
    ///
    /// # Arguments
    /// * `location` - Location of the registry
    /// * `req` - The bucket creation request
    ///
    /// # Returns
    /// The created bucket, plus the provisioning operation if the service
    /// returned one
    ///
    /// # Example
    /// ```no_run
    /// # use hangar_client::RegistryClient;
    /// # use hangar_core::domain::location::Location;
    /// # use hangar_core::dto::bucket::CreateBucket;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = RegistryClient::new("http://localhost:8080");
    /// let location = Location::new("my-org", "my-project");
    /// let created = client.create_bucket(&location, &CreateBucket {
    ///     slug: "img-1".to_string(),
    ///     description: String::new(),
    ///     labels: Default::default(),
    /// }).await?;
    /// println!("{}", created.bucket.slug);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_bucket(
        &self,
        location: &Location,
        req: &CreateBucket,
    ) -> Result<CreateBucketResponse> {
        let url = format!("{}/buckets", self.registry_url(location));
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Get a bucket by slug
    pub async fn get_bucket(&self, location: &Location, bucket_slug: &str) -> Result<Bucket> {
        let url = self.bucket_url(location, bucket_slug);
        let response = self.client.get(&url).send().await?;

        let body: BucketResponse = self.handle_response(response).await?;
        Ok(body.bucket)
    }

    /// List one page of buckets, sorted by name
    ///
    /// # Arguments
    /// * `location` - Location of the registry
    /// * `page_token` - Cursor returned by the previous page, or `None` for the first page
    pub async fn list_buckets(
        &self,
        location: &Location,
        page_token: Option<&str>,
    ) -> Result<Page<Bucket>> {
        let url = format!("{}/buckets", self.registry_url(location));
        let mut query = page_query(page_token);
        query.push(("sorting.order_by", "name".to_string()));

        let response = self.client.get(&url).query(&query).send().await?;

        let body: ListBucketsResponse = self.handle_response(response).await?;
        Ok(body.into())
    }

    /// Delete a bucket
    pub async fn delete_bucket(&self, location: &Location, bucket_slug: &str) -> Result<()> {
        let url = self.bucket_url(location, bucket_slug);
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }
}
