//! Run-task credential domain model

use serde::{Deserialize, Serialize};

/// Endpoint and HMAC key an external CI system uses to report back to the registry
///
/// A per-project singleton. The key is stable across reads and only changes
/// when a regeneration is requested explicitly.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTaskCredential {
    pub endpoint_url: String,
    pub hmac_key: String,
}

// Keep the key out of logs.
impl std::fmt::Debug for RunTaskCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunTaskCredential")
            .field("endpoint_url", &self.endpoint_url)
            .field("hmac_key", &"<redacted>")
            .finish()
    }
}
