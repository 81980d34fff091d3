//! Location domain model
//!
//! The addressing key passed into every remote call.

use serde::{Deserialize, Serialize};

/// Organization/project/region triple that scopes every remote call
///
/// Resolved once by the caller and treated as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub organization_id: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

/// Cloud provider region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub provider: String,
    pub region: String,
}

impl Location {
    /// Creates a location without a region
    pub fn new(organization_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            project_id: project_id.into(),
            region: None,
        }
    }

    /// Attaches a provider region
    pub fn with_region(mut self, provider: impl Into<String>, region: impl Into<String>) -> Self {
        self.region = Some(Region {
            provider: provider.into(),
            region: region.into(),
        });
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "organization_id={}, project_id={}",
            self.organization_id, self.project_id
        )?;
        if let Some(region) = &self.region {
            write!(f, ", region={}/{}", region.provider, region.region)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_region_when_set() {
        let loc = Location::new("org", "proj");
        assert_eq!(loc.to_string(), "organization_id=org, project_id=proj");

        let loc = loc.with_region("aws", "us-east-1");
        assert_eq!(
            loc.to_string(),
            "organization_id=org, project_id=proj, region=aws/us-east-1"
        );
    }
}
