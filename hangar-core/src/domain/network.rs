//! Network domain model

use serde::{Deserialize, Serialize};

use crate::domain::location::Location;

/// A virtual network that peers with the registry's consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,

    #[serde(default)]
    pub cidr_block: String,

    #[serde(default)]
    pub provider_type: String,

    #[serde(default)]
    pub location: Option<Location>,

    #[serde(default)]
    pub state: String,
}
