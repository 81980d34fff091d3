//! Registry DTOs

use serde::{Deserialize, Serialize};

use crate::domain::operation::Operation;
use crate::domain::registry::{Registry, RegistryTier};

/// Request to create the project's registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegistry {
    pub feature_tier: RegistryTier,
}

/// Request to change the registry's feature tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRegistry {
    pub feature_tier: RegistryTier,
}

/// Response to a registry read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryResponse {
    pub registry: Registry,
}

/// Response to a registry create or update
///
/// The registry change completes asynchronously; `operation` tracks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryMutation {
    #[serde(default)]
    pub registry: Option<Registry>,

    #[serde(default)]
    pub operation: Option<Operation>,
}
