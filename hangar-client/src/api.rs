//! Registry API trait
//!
//! Abstracts every remote call the reconciler makes so that reconciliation
//! logic can be exercised against an in-memory registry. [`RegistryClient`]
//! is the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use hangar_core::domain::build::Build;
use hangar_core::domain::bucket::Bucket;
use hangar_core::domain::channel::Channel;
use hangar_core::domain::iteration::{Iteration, IterationRef};
use hangar_core::domain::location::Location;
use hangar_core::domain::network::Network;
use hangar_core::domain::operation::Operation;
use hangar_core::domain::registry::Registry;
use hangar_core::domain::run_task::RunTaskCredential;
use hangar_core::dto::bucket::{CreateBucket, CreateBucketResponse};
use hangar_core::dto::build::{CreateBuild, UpdateBuild};
use hangar_core::dto::channel::{CreateChannel, UpdateChannel};
use hangar_core::dto::iteration::{CreateIteration, UpdateIteration};
use hangar_core::dto::pagination::Page;
use hangar_core::dto::registry::{CreateRegistry, RegistryMutation, UpdateRegistry};

use crate::RegistryClient;
use crate::error::Result;

/// Remote registry operations
///
/// Every method is location-scoped and carries no client-side state.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    // Registry
    async fn create_registry(
        &self,
        location: &Location,
        req: &CreateRegistry,
    ) -> Result<RegistryMutation>;

    async fn get_registry(&self, location: &Location) -> Result<Registry>;

    async fn update_registry(
        &self,
        location: &Location,
        req: &UpdateRegistry,
    ) -> Result<RegistryMutation>;

    // Buckets
    async fn create_bucket(
        &self,
        location: &Location,
        req: &CreateBucket,
    ) -> Result<CreateBucketResponse>;

    async fn get_bucket(&self, location: &Location, bucket_slug: &str) -> Result<Bucket>;

    async fn list_buckets(
        &self,
        location: &Location,
        page_token: Option<&str>,
    ) -> Result<Page<Bucket>>;

    async fn delete_bucket(&self, location: &Location, bucket_slug: &str) -> Result<()>;

    // Iterations
    async fn create_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        req: &CreateIteration,
    ) -> Result<Iteration>;

    async fn get_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration: &IterationRef,
    ) -> Result<Iteration>;

    async fn list_iterations(
        &self,
        location: &Location,
        bucket_slug: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Iteration>>;

    async fn update_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        req: &UpdateIteration,
    ) -> Result<Iteration>;

    async fn delete_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
    ) -> Result<()>;

    // Builds
    async fn create_build(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        req: &CreateBuild,
    ) -> Result<Build>;

    async fn update_build(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        build_id: &str,
        req: &UpdateBuild,
    ) -> Result<Build>;

    async fn list_builds(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Build>>;

    // Channels
    async fn create_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        req: &CreateChannel,
    ) -> Result<Channel>;

    async fn get_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
    ) -> Result<Channel>;

    async fn update_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
        req: &UpdateChannel,
    ) -> Result<Channel>;

    async fn delete_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
    ) -> Result<()>;

    async fn list_channels(
        &self,
        location: &Location,
        bucket_slug: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Channel>>;

    // Operations
    async fn wait_operation(
        &self,
        location: &Location,
        operation_id: &str,
        timeout: Duration,
    ) -> Result<Operation>;

    // Run task
    async fn get_run_task(&self, location: &Location) -> Result<RunTaskCredential>;

    async fn regenerate_run_task_hmac(&self, location: &Location) -> Result<RunTaskCredential>;

    // Networks
    async fn get_network(&self, location: &Location, network_id: &str) -> Result<Network>;
}

#[async_trait]
impl RegistryApi for RegistryClient {
    async fn create_registry(
        &self,
        location: &Location,
        req: &CreateRegistry,
    ) -> Result<RegistryMutation> {
        RegistryClient::create_registry(self, location, req).await
    }

    async fn get_registry(&self, location: &Location) -> Result<Registry> {
        RegistryClient::get_registry(self, location).await
    }

    async fn update_registry(
        &self,
        location: &Location,
        req: &UpdateRegistry,
    ) -> Result<RegistryMutation> {
        RegistryClient::update_registry(self, location, req).await
    }

    async fn create_bucket(
        &self,
        location: &Location,
        req: &CreateBucket,
    ) -> Result<CreateBucketResponse> {
        RegistryClient::create_bucket(self, location, req).await
    }

    async fn get_bucket(&self, location: &Location, bucket_slug: &str) -> Result<Bucket> {
        RegistryClient::get_bucket(self, location, bucket_slug).await
    }

    async fn list_buckets(
        &self,
        location: &Location,
        page_token: Option<&str>,
    ) -> Result<Page<Bucket>> {
        RegistryClient::list_buckets(self, location, page_token).await
    }

    async fn delete_bucket(&self, location: &Location, bucket_slug: &str) -> Result<()> {
        RegistryClient::delete_bucket(self, location, bucket_slug).await
    }

    async fn create_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        req: &CreateIteration,
    ) -> Result<Iteration> {
        RegistryClient::create_iteration(self, location, bucket_slug, req).await
    }

    async fn get_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration: &IterationRef,
    ) -> Result<Iteration> {
        RegistryClient::get_iteration(self, location, bucket_slug, iteration).await
    }

    async fn list_iterations(
        &self,
        location: &Location,
        bucket_slug: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Iteration>> {
        RegistryClient::list_iterations(self, location, bucket_slug, page_token).await
    }

    async fn update_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        req: &UpdateIteration,
    ) -> Result<Iteration> {
        RegistryClient::update_iteration(self, location, bucket_slug, iteration_id, req).await
    }

    async fn delete_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
    ) -> Result<()> {
        RegistryClient::delete_iteration(self, location, bucket_slug, iteration_id).await
    }

    async fn create_build(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        req: &CreateBuild,
    ) -> Result<Build> {
        RegistryClient::create_build(self, location, bucket_slug, iteration_id, req).await
    }

    async fn update_build(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        build_id: &str,
        req: &UpdateBuild,
    ) -> Result<Build> {
        RegistryClient::update_build(self, location, bucket_slug, iteration_id, build_id, req)
            .await
    }

    async fn list_builds(
        &self,
        location: &Location,
        bucket_slug: &str,
        iteration_id: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Build>> {
        RegistryClient::list_builds(self, location, bucket_slug, iteration_id, page_token).await
    }

    async fn create_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        req: &CreateChannel,
    ) -> Result<Channel> {
        RegistryClient::create_channel(self, location, bucket_slug, req).await
    }

    async fn get_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
    ) -> Result<Channel> {
        RegistryClient::get_channel(self, location, bucket_slug, channel_slug).await
    }

    async fn update_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
        req: &UpdateChannel,
    ) -> Result<Channel> {
        RegistryClient::update_channel(self, location, bucket_slug, channel_slug, req).await
    }

    async fn delete_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
    ) -> Result<()> {
        RegistryClient::delete_channel(self, location, bucket_slug, channel_slug).await
    }

    async fn list_channels(
        &self,
        location: &Location,
        bucket_slug: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Channel>> {
        RegistryClient::list_channels(self, location, bucket_slug, page_token).await
    }

    async fn wait_operation(
        &self,
        location: &Location,
        operation_id: &str,
        timeout: Duration,
    ) -> Result<Operation> {
        RegistryClient::wait_operation(self, location, operation_id, timeout).await
    }

    async fn get_run_task(&self, location: &Location) -> Result<RunTaskCredential> {
        RegistryClient::get_run_task(self, location).await
    }

    async fn regenerate_run_task_hmac(&self, location: &Location) -> Result<RunTaskCredential> {
        RegistryClient::regenerate_run_task_hmac(self, location).await
    }

    async fn get_network(&self, location: &Location, network_id: &str) -> Result<Network> {
        RegistryClient::get_network(self, location, network_id).await
    }
}
