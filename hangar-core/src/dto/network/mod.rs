//! Network DTOs

use serde::{Deserialize, Serialize};

use crate::domain::network::Network;

/// Response to a network read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkResponse {
    pub network: Network,
}
