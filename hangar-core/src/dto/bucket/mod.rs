//! Bucket DTOs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::bucket::Bucket;
use crate::domain::operation::Operation;
use crate::dto::pagination::{Page, Pagination};

/// Request to create a bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBucket {
    pub slug: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

/// Response to a bucket read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketResponse {
    pub bucket: Bucket,
}

/// Response to a bucket create
///
/// When bucket provisioning is asynchronous the service returns an operation
/// that must complete before the bucket is usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBucketResponse {
    pub bucket: Bucket,

    #[serde(default)]
    pub operation: Option<Operation>,
}

/// One page of buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBucketsResponse {
    #[serde(default)]
    pub buckets: Vec<Bucket>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl From<ListBucketsResponse> for Page<Bucket> {
    fn from(response: ListBucketsResponse) -> Self {
        Page::from_listing(response.buckets, response.pagination)
    }
}
