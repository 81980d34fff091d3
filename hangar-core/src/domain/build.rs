//! Build domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One provider-specific build result within an iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub id: String,

    #[serde(default)]
    pub iteration_id: String,

    /// Builder component that produced the build (e.g. "amazon-ebs.example")
    #[serde(default)]
    pub component_type: String,

    #[serde(default)]
    pub cloud_provider: String,

    #[serde(default)]
    pub packer_run_uuid: String,

    #[serde(default)]
    pub status: BuildStatus,

    /// Published artifact references, attached on completion
    #[serde(default)]
    pub images: Vec<Image>,

    #[serde(default)]
    pub labels: HashMap<String, String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Build status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    #[default]
    Unset,
    Running,
    Done,
    Cancelled,
    Failed,
}

impl BuildStatus {
    /// Whether the status is final
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BuildStatus::Done | BuildStatus::Cancelled | BuildStatus::Failed
        )
    }

    /// Whether a build in this status may move to `next`
    ///
    /// Terminal statuses never transition, and nothing moves back to `Unset`.
    pub fn can_transition_to(&self, next: BuildStatus) -> bool {
        !self.is_terminal() && next != BuildStatus::Unset
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStatus::Unset => write!(f, "UNSET"),
            BuildStatus::Running => write!(f, "RUNNING"),
            BuildStatus::Done => write!(f, "DONE"),
            BuildStatus::Cancelled => write!(f, "CANCELLED"),
            BuildStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// A provider-specific artifact reference (e.g. an AMI in one region)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub id: String,

    pub image_id: String,

    pub region: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
