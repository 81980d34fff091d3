//! Channel upsert and assignment

use hangar_client::RegistryApi;
use hangar_core::domain::channel::Channel;
use hangar_core::domain::iteration::IterationRef;
use hangar_core::domain::location::Location;
use hangar_core::dto::channel::{CreateChannel, UpdateChannel};
use tracing::{info, warn};

use super::{NodeKind, Reconciler, UpsertError, deleted_or_missing};
use crate::error::Result;
use crate::paginate::list_all;

impl<A: RegistryApi + ?Sized> Reconciler<A> {
    /// Ensures a channel exists and, if a target is given, points at it
    ///
    /// A target given by id is set on creation. Other references are applied
    /// with a follow-up assignment. An existing channel is only repointed when
    /// it does not already reference the target.
    pub async fn upsert_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
        target: Option<&IterationRef>,
    ) -> Result<Channel> {
        info!("Upserting channel {} in bucket {}", channel_slug, bucket_slug);

        let create = CreateChannel {
            slug: channel_slug.to_string(),
            iteration_id: match target {
                Some(IterationRef::Id(id)) => Some(id.clone()),
                _ => None,
            },
        };

        match self.api.create_channel(location, bucket_slug, &create).await {
            Ok(channel) => match target {
                Some(target) if !matches!(target, IterationRef::Id(_)) => {
                    self.assign_channel(location, bucket_slug, channel_slug, Some(target))
                        .await
                }
                _ => Ok(channel),
            },
            Err(err) => match UpsertError::classify(err, NodeKind::Channel) {
                UpsertError::AlreadyExists(_) => {
                    warn!(
                        "Channel {} already exists in bucket {}, reading it",
                        channel_slug, bucket_slug
                    );
                    let existing = self
                        .api
                        .get_channel(location, bucket_slug, channel_slug)
                        .await?;

                    let up_to_date = match (target, existing.iteration.as_ref()) {
                        (None, _) => true,
                        (Some(target), Some(current)) => target.matches(current),
                        (Some(_), None) => false,
                    };
                    if up_to_date {
                        return Ok(existing);
                    }

                    self.assign_channel(location, bucket_slug, channel_slug, target)
                        .await
                }
                other => Err(other.into_inner().into()),
            },
        }
    }

    /// Points a channel at an iteration
    ///
    /// Exactly one key of `target` is sent. With no target the update body is
    /// empty and the service decides what that means.
    pub async fn assign_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
        target: Option<&IterationRef>,
    ) -> Result<Channel> {
        match target {
            Some(target) => info!(
                "Assigning channel {} in bucket {} to iteration {}",
                channel_slug, bucket_slug, target
            ),
            None => info!(
                "Updating channel {} in bucket {} without a target",
                channel_slug, bucket_slug
            ),
        }

        let update = UpdateChannel::targeting(target);
        Ok(self
            .api
            .update_channel(location, bucket_slug, channel_slug, &update)
            .await?)
    }

    /// Deletes a channel; a missing channel counts as deleted
    pub async fn delete_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
    ) -> Result<()> {
        info!("Deleting channel {} in bucket {}", channel_slug, bucket_slug);
        if !deleted_or_missing(
            self.api
                .delete_channel(location, bucket_slug, channel_slug)
                .await,
        )? {
            info!("Channel {} already deleted", channel_slug);
        }
        Ok(())
    }

    /// Lists every channel in a bucket
    pub async fn list_channels(&self, location: &Location, bucket_slug: &str) -> Result<Vec<Channel>> {
        let api = self.api.as_ref();
        list_all(self.config.max_pages, move |cursor| async move {
            api.list_channels(location, bucket_slug, cursor.as_deref())
                .await
        })
        .await
    }
}
