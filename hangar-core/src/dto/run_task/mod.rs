//! Run-task DTOs

use serde::{Deserialize, Serialize};

use crate::domain::run_task::RunTaskCredential;

/// Response to a run-task read or HMAC regeneration
#[derive(Clone, Serialize, Deserialize)]
pub struct RunTaskResponse {
    #[serde(rename = "api_url")]
    pub endpoint_url: String,

    pub hmac_key: String,
}

impl From<RunTaskResponse> for RunTaskCredential {
    fn from(response: RunTaskResponse) -> Self {
        RunTaskCredential {
            endpoint_url: response.endpoint_url,
            hmac_key: response.hmac_key,
        }
    }
}
