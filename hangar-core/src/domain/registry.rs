//! Registry domain model
//!
//! The per-project registry that owns every bucket.

use serde::{Deserialize, Serialize};

/// A project's image registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub id: String,

    #[serde(default)]
    pub feature_tier: RegistryTier,

    /// Whether the registry is active (deactivated registries reject writes)
    #[serde(default)]
    pub activated: bool,
}

/// Registry feature tier
///
/// Unknown tiers are preserved verbatim so that newer service versions do not
/// break decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RegistryTier {
    #[default]
    Unset,
    Standard,
    Plus,
    Other(String),
}

impl From<String> for RegistryTier {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" | "UNSET" => RegistryTier::Unset,
            "STANDARD" => RegistryTier::Standard,
            "PLUS" => RegistryTier::Plus,
            _ => RegistryTier::Other(value),
        }
    }
}

impl From<RegistryTier> for String {
    fn from(tier: RegistryTier) -> Self {
        tier.to_string()
    }
}

impl std::fmt::Display for RegistryTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryTier::Unset => write!(f, "UNSET"),
            RegistryTier::Standard => write!(f, "STANDARD"),
            RegistryTier::Plus => write!(f, "PLUS"),
            RegistryTier::Other(other) => write!(f, "{}", other),
        }
    }
}

impl std::str::FromStr for RegistryTier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RegistryTier::from(s.to_ascii_uppercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parses_case_insensitively() {
        assert_eq!("plus".parse::<RegistryTier>().unwrap(), RegistryTier::Plus);
        assert_eq!(
            "Standard".parse::<RegistryTier>().unwrap(),
            RegistryTier::Standard
        );
    }

    #[test]
    fn test_unknown_tier_is_preserved() {
        let registry: Registry =
            serde_json::from_str(r#"{"id":"r1","feature_tier":"ENTERPRISE","activated":true}"#)
                .unwrap();
        assert_eq!(
            registry.feature_tier,
            RegistryTier::Other("ENTERPRISE".to_string())
        );
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["feature_tier"], "ENTERPRISE");
    }
}
