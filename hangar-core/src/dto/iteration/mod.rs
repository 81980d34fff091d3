//! Iteration DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::iteration::Iteration;
use crate::dto::pagination::{Page, Pagination};

/// Request to create an iteration in a bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIteration {
    pub fingerprint: String,
}

/// Request to update an iteration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateIteration {
    /// Schedules (or, if in the past, applies) revocation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoke_at: Option<DateTime<Utc>>,
}

/// Response to an iteration read, create or update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationResponse {
    pub iteration: Iteration,
}

/// One page of iterations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListIterationsResponse {
    #[serde(default)]
    pub iterations: Vec<Iteration>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl From<ListIterationsResponse> for Page<Iteration> {
    fn from(response: ListIterationsResponse) -> Self {
        Page::from_listing(response.iterations, response.pagination)
    }
}
