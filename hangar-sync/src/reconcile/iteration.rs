//! Iteration upsert, lookup, revocation and deletion

use chrono::{DateTime, Utc};
use hangar_client::RegistryApi;
use hangar_core::domain::iteration::{Iteration, IterationRef};
use hangar_core::domain::location::Location;
use hangar_core::dto::iteration::{CreateIteration, UpdateIteration};
use tracing::{info, warn};

use super::{NodeKind, Reconciler, UpsertError, deleted_or_missing};
use crate::desired::BuildSpec;
use crate::error::Result;
use crate::paginate::list_all;

impl<A: RegistryApi + ?Sized> Reconciler<A> {
    /// Ensures an iteration with this fingerprint exists in the bucket
    pub async fn upsert_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        fingerprint: &str,
    ) -> Result<Iteration> {
        info!("Upserting iteration {} in bucket {}", fingerprint, bucket_slug);

        let create = CreateIteration {
            fingerprint: fingerprint.to_string(),
        };
        match self.api.create_iteration(location, bucket_slug, &create).await {
            Ok(iteration) => Ok(iteration),
            Err(err) => match UpsertError::classify(err, NodeKind::Iteration) {
                UpsertError::AlreadyExists(_) => {
                    warn!(
                        "Iteration {} already exists in bucket {}, reading it",
                        fingerprint, bucket_slug
                    );
                    let target = IterationRef::Fingerprint(fingerprint.to_string());
                    Ok(self.api.get_iteration(location, bucket_slug, &target).await?)
                }
                other => Err(other.into_inner().into()),
            },
        }
    }

    /// Ensures an iteration exists and every listed build is published into it
    ///
    /// # Returns
    /// The iteration as read back after publishing, so that the version the
    /// service assigned is visible
    pub async fn upsert_complete_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        fingerprint: &str,
        builds: &[BuildSpec],
    ) -> Result<Iteration> {
        let iteration = self
            .upsert_iteration(location, bucket_slug, fingerprint)
            .await?;

        for spec in builds {
            self.publish_build(location, bucket_slug, &iteration, spec)
                .await?;
        }

        self.get_iteration(location, bucket_slug, &IterationRef::Fingerprint(fingerprint.to_string()))
            .await
    }

    /// Reads one iteration
    pub async fn get_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        target: &IterationRef,
    ) -> Result<Iteration> {
        Ok(self.api.get_iteration(location, bucket_slug, target).await?)
    }

    /// Lists every iteration in a bucket
    pub async fn list_iterations(
        &self,
        location: &Location,
        bucket_slug: &str,
    ) -> Result<Vec<Iteration>> {
        let api = self.api.as_ref();
        list_all(self.config.max_pages, move |cursor| async move {
            api.list_iterations(location, bucket_slug, cursor.as_deref())
                .await
        })
        .await
    }

    /// Schedules revocation of an iteration
    ///
    /// A `revoke_at` in the past revokes immediately.
    pub async fn revoke_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        target: &IterationRef,
        revoke_at: DateTime<Utc>,
    ) -> Result<Iteration> {
        let iteration_id = self.resolve_iteration_id(location, bucket_slug, target).await?;
        info!(
            "Revoking iteration {} in bucket {} at {}",
            iteration_id, bucket_slug, revoke_at
        );

        let update = UpdateIteration {
            revoke_at: Some(revoke_at),
        };
        Ok(self
            .api
            .update_iteration(location, bucket_slug, &iteration_id, &update)
            .await?)
    }

    /// Deletes an iteration
    ///
    /// Non-id references are resolved to the generated id first. A missing
    /// iteration counts as deleted.
    pub async fn delete_iteration(
        &self,
        location: &Location,
        bucket_slug: &str,
        target: &IterationRef,
    ) -> Result<()> {
        let iteration_id = match self.resolve_iteration_id(location, bucket_slug, target).await {
            Ok(id) => id,
            Err(err) if err.is_not_found() => {
                info!("Iteration {} already deleted", target);
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        info!("Deleting iteration {} in bucket {}", iteration_id, bucket_slug);
        deleted_or_missing(
            self.api
                .delete_iteration(location, bucket_slug, &iteration_id)
                .await,
        )?;
        Ok(())
    }

    async fn resolve_iteration_id(
        &self,
        location: &Location,
        bucket_slug: &str,
        target: &IterationRef,
    ) -> Result<String> {
        match target {
            IterationRef::Id(id) => Ok(id.clone()),
            other => Ok(self.get_iteration(location, bucket_slug, other).await?.id),
        }
    }
}
