//! Channel endpoints

use crate::error::Result;
use crate::{RegistryClient, page_query};
use hangar_core::domain::channel::Channel;
use hangar_core::domain::location::Location;
use hangar_core::dto::channel::{
    ChannelResponse, CreateChannel, ListChannelsResponse, UpdateChannel,
};
use hangar_core::dto::pagination::Page;

impl RegistryClient {
    // =============================================================================
    // Channel Management
    // =============================================================================

    fn channel_url(&self, location: &Location, bucket_slug: &str, channel_slug: &str) -> String {
        format!(
            "{}/channels/{}",
            self.bucket_url(location, bucket_slug),
            channel_slug
        )
    }

    /// Create a channel in a bucket
    pub async fn create_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        req: &CreateChannel,
    ) -> Result<Channel> {
        let url = format!("{}/channels", self.bucket_url(location, bucket_slug));
        let response = self.client.post(&url).json(req).send().await?;

        let body: ChannelResponse = self.handle_response(response).await?;
        Ok(body.channel)
    }

    /// Get a channel by slug
    pub async fn get_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
    ) -> Result<Channel> {
        let url = self.channel_url(location, bucket_slug, channel_slug);
        let response = self.client.get(&url).send().await?;

        let body: ChannelResponse = self.handle_response(response).await?;
        Ok(body.channel)
    }

    /// Repoint a channel
    ///
    /// # Arguments
    /// * `location` - Location of the registry
    /// * `bucket_slug` - Bucket that owns the channel
    /// * `channel_slug` - Channel to update
    /// * `req` - Update body; carries at most one iteration key
    pub async fn update_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
        req: &UpdateChannel,
    ) -> Result<Channel> {
        let url = self.channel_url(location, bucket_slug, channel_slug);
        let response = self.client.patch(&url).json(req).send().await?;

        let body: ChannelResponse = self.handle_response(response).await?;
        Ok(body.channel)
    }

    /// Delete a channel
    pub async fn delete_channel(
        &self,
        location: &Location,
        bucket_slug: &str,
        channel_slug: &str,
    ) -> Result<()> {
        let url = self.channel_url(location, bucket_slug, channel_slug);
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }

    /// List one page of a bucket's channels
    pub async fn list_channels(
        &self,
        location: &Location,
        bucket_slug: &str,
        page_token: Option<&str>,
    ) -> Result<Page<Channel>> {
        let url = format!("{}/channels", self.bucket_url(location, bucket_slug));
        let response = self
            .client
            .get(&url)
            .query(&page_query(page_token))
            .send()
            .await?;

        let body: ListChannelsResponse = self.handle_response(response).await?;
        Ok(body.into())
    }
}
