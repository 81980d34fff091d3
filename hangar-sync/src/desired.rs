//! Desired-state inputs for reconciliation

use std::collections::HashMap;

use hangar_core::dto::bucket::CreateBucket;
use hangar_core::dto::build::ImageCreateBody;
use serde::{Deserialize, Serialize};

/// Desired bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketSpec {
    pub slug: String,
    pub description: String,
    pub labels: HashMap<String, String>,
}

impl BucketSpec {
    /// A bucket with only a slug
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }
}

impl From<&BucketSpec> for CreateBucket {
    fn from(spec: &BucketSpec) -> Self {
        CreateBucket {
            slug: spec.slug.clone(),
            description: spec.description.clone(),
            labels: spec.labels.clone(),
        }
    }
}

/// Desired build result for one component of an iteration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
    /// Builder component (e.g. "amazon-ebs.example")
    pub component_type: String,
    pub cloud_provider: String,
    #[serde(default)]
    pub images: Vec<ImageSpec>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// An artifact published by a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub image_id: String,
    pub region: String,
}

impl ImageSpec {
    pub fn new(image_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            region: region.into(),
        }
    }
}

impl From<&ImageSpec> for ImageCreateBody {
    fn from(spec: &ImageSpec) -> Self {
        ImageCreateBody {
            image_id: spec.image_id.clone(),
            region: spec.region.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_spec_from_json() {
        let spec: BuildSpec = serde_json::from_str(
            r#"{
                "component_type": "amazon-ebs.example",
                "cloud_provider": "aws",
                "images": [{"image_id": "ami-42", "region": "us-east-1"}]
            }"#,
        )
        .unwrap();

        assert!(spec.labels.is_empty());
        let body = ImageCreateBody::from(&spec.images[0]);
        assert_eq!(body.image_id, "ami-42");
        assert_eq!(body.region, "us-east-1");
    }

    #[test]
    fn test_bucket_spec_defaults() {
        let spec: BucketSpec = serde_json::from_str(r#"{"slug": "img"}"#).unwrap();
        assert_eq!(spec, BucketSpec::new("img"));

        let create = CreateBucket::from(&spec);
        assert_eq!(create.slug, "img");
        assert!(create.description.is_empty());
    }
}
