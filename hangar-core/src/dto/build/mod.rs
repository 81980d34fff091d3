//! Build DTOs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::build::{Build, BuildStatus, Image};
use crate::dto::pagination::{Page, Pagination};

/// Request to create a build in an iteration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBuild {
    pub fingerprint: String,
    pub build: BuildCreateBody,
}

/// Build fields sent on creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildCreateBody {
    pub cloud_provider: String,
    pub component_type: String,
    pub packer_run_uuid: String,
    pub status: BuildStatus,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Request to update a build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBuild {
    pub updates: BuildUpdates,
}

/// Build fields sent on update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildUpdates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BuildStatus>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageCreateBody>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// An image to attach to a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCreateBody {
    pub image_id: String,
    pub region: String,
}

impl From<&Image> for ImageCreateBody {
    fn from(image: &Image) -> Self {
        Self {
            image_id: image.image_id.clone(),
            region: image.region.clone(),
        }
    }
}

/// Response to a build create, read or update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResponse {
    pub build: Build,
}

/// One page of builds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBuildsResponse {
    #[serde(default)]
    pub builds: Vec<Build>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl From<ListBuildsResponse> for Page<Build> {
    fn from(response: ListBuildsResponse) -> Self {
        Page::from_listing(response.builds, response.pagination)
    }
}
