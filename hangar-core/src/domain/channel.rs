//! Channel domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::iteration::Iteration;

/// A named, mutable pointer from a bucket to one iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default)]
    pub id: String,

    pub slug: String,

    #[serde(default)]
    pub bucket_slug: String,

    /// The iteration the channel currently points to, if any
    #[serde(default)]
    pub iteration: Option<Iteration>,

    /// Channels managed by the service itself (e.g. "latest") reject updates
    #[serde(default)]
    pub managed: bool,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Channel {
    /// Id of the iteration the channel points to, if any
    pub fn iteration_id(&self) -> Option<&str> {
        self.iteration.as_ref().map(|iteration| iteration.id.as_str())
    }
}
