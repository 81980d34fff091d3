//! Channel DTOs

use serde::{Deserialize, Serialize};

use crate::domain::channel::Channel;
use crate::domain::iteration::IterationRef;
use crate::dto::pagination::{Page, Pagination};

/// Request to create a channel in a bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChannel {
    pub slug: String,

    /// Iteration to point at on creation; channels can also start empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration_id: Option<String>,
}

/// Request to repoint a channel
///
/// At most one targeting field is ever populated. An update without any
/// target serializes to an empty object and is left to the service to
/// interpret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental_version: Option<u32>,
}

impl UpdateChannel {
    /// Builds the update body for a target iteration
    pub fn targeting(target: Option<&IterationRef>) -> Self {
        match target {
            Some(IterationRef::Id(id)) => Self {
                iteration_id: Some(id.clone()),
                ..Self::default()
            },
            Some(IterationRef::Fingerprint(fingerprint)) => Self {
                fingerprint: Some(fingerprint.clone()),
                ..Self::default()
            },
            Some(IterationRef::IncrementalVersion(version)) => Self {
                incremental_version: Some(*version),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// Whether no targeting field is set
    pub fn is_empty(&self) -> bool {
        self.iteration_id.is_none() && self.fingerprint.is_none() && self.incremental_version.is_none()
    }
}

/// Response to a channel create, read or update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelResponse {
    pub channel: Channel,
}

/// One page of channels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListChannelsResponse {
    #[serde(default)]
    pub channels: Vec<Channel>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl From<ListChannelsResponse> for Page<Channel> {
    fn from(response: ListChannelsResponse) -> Self {
        Page::from_listing(response.channels, response.pagination)
    }
}
