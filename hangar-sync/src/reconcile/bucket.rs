//! Bucket upsert, listing and deletion

use hangar_client::RegistryApi;
use hangar_core::domain::bucket::Bucket;
use hangar_core::domain::location::Location;
use hangar_core::dto::bucket::CreateBucket;
use tracing::{info, warn};

use super::{NodeKind, Reconciler, UpsertError, deleted_or_missing};
use crate::desired::BucketSpec;
use crate::error::Result;
use crate::paginate::list_all;

impl<A: RegistryApi + ?Sized> Reconciler<A> {
    /// Ensures a bucket exists
    ///
    /// A bucket that already exists is read back as-is; its description and
    /// labels are not reconciled.
    pub async fn upsert_bucket(&self, location: &Location, spec: &BucketSpec) -> Result<Bucket> {
        info!("Upserting bucket {}", spec.slug);

        match self.api.create_bucket(location, &CreateBucket::from(spec)).await {
            Ok(created) => {
                self.await_operation(location, created.operation.as_ref(), "Create Bucket")
                    .await?;
                Ok(created.bucket)
            }
            Err(err) => match UpsertError::classify(err, NodeKind::Bucket) {
                UpsertError::AlreadyExists(_) => {
                    warn!("Bucket {} already exists, reading it", spec.slug);
                    Ok(self.api.get_bucket(location, &spec.slug).await?)
                }
                other => Err(other.into_inner().into()),
            },
        }
    }

    /// Lists every bucket in the location, sorted by name
    pub async fn list_buckets(&self, location: &Location) -> Result<Vec<Bucket>> {
        let api = self.api.as_ref();
        list_all(self.config.max_pages, move |cursor| async move {
            api.list_buckets(location, cursor.as_deref()).await
        })
        .await
    }

    /// Names of every bucket in the location, in name order
    pub async fn bucket_names(&self, location: &Location) -> Result<Vec<String>> {
        let buckets = self.list_buckets(location).await?;
        Ok(buckets.into_iter().map(|bucket| bucket.name).collect())
    }

    /// Deletes a bucket together with its channels and iterations
    ///
    /// Service-managed channels are left for the service to remove. Nodes that
    /// are already gone count as deleted.
    pub async fn delete_bucket(&self, location: &Location, bucket_slug: &str) -> Result<()> {
        info!("Deleting bucket {}", bucket_slug);

        let channels = match self.list_channels(location, bucket_slug).await {
            Ok(channels) => channels,
            Err(err) if err.is_not_found() => {
                info!("Bucket {} already deleted", bucket_slug);
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        for channel in channels.iter().filter(|channel| !channel.managed) {
            self.delete_channel(location, bucket_slug, &channel.slug)
                .await?;
        }

        let iterations = self.list_iterations(location, bucket_slug).await?;
        for iteration in &iterations {
            deleted_or_missing(
                self.api
                    .delete_iteration(location, bucket_slug, &iteration.id)
                    .await,
            )?;
        }

        if !deleted_or_missing(self.api.delete_bucket(location, bucket_slug).await)? {
            info!("Bucket {} already deleted", bucket_slug);
        }
        Ok(())
    }
}
