//! Iteration domain model
//!
//! An iteration is a content-addressed version of a bucket's artifact. It is
//! identified either by its fingerprint (unique within the bucket) or by its
//! generated id, and it is assigned a monotonic incremental version once a
//! completed build publishes image metadata into it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::build::Build;

/// A version of a bucket's artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iteration {
    pub id: String,

    #[serde(default)]
    pub bucket_slug: String,

    pub fingerprint: String,

    /// Assigned by the service on publish; 0 until then
    #[serde(default)]
    pub incremental_version: u32,

    /// Whether every expected build has completed
    #[serde(default)]
    pub complete: bool,

    /// Soft-deletion-by-expiry timestamp
    #[serde(default)]
    pub revoke_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub builds: Vec<Build>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Iteration {
    /// Whether the service has assigned an incremental version
    pub fn is_published(&self) -> bool {
        self.incremental_version > 0
    }

    /// Whether the iteration is revoked as of `now`
    pub fn is_revoked(&self, now: DateTime<Utc>) -> bool {
        self.revoke_at.is_some_and(|revoke_at| revoke_at <= now)
    }
}

/// Reference to a single iteration within a bucket
///
/// Exactly one identifying key is carried, so a reference can never be
/// ambiguous about which iteration it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationRef {
    Id(String),
    Fingerprint(String),
    IncrementalVersion(u32),
}

impl IterationRef {
    /// Builds a reference from loosely populated fields
    ///
    /// The first set field wins, in the order id, fingerprint, incremental
    /// version. Empty strings and a zero version count as unset.
    pub fn from_fields(id: &str, fingerprint: &str, incremental_version: u32) -> Option<Self> {
        if !id.is_empty() {
            Some(IterationRef::Id(id.to_string()))
        } else if !fingerprint.is_empty() {
            Some(IterationRef::Fingerprint(fingerprint.to_string()))
        } else if incremental_version > 0 {
            Some(IterationRef::IncrementalVersion(incremental_version))
        } else {
            None
        }
    }

    /// Whether this reference identifies the given iteration
    pub fn matches(&self, iteration: &Iteration) -> bool {
        match self {
            IterationRef::Id(id) => &iteration.id == id,
            IterationRef::Fingerprint(fingerprint) => &iteration.fingerprint == fingerprint,
            IterationRef::IncrementalVersion(version) => iteration.incremental_version == *version,
        }
    }
}

impl std::fmt::Display for IterationRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IterationRef::Id(id) => write!(f, "id={}", id),
            IterationRef::Fingerprint(fingerprint) => write!(f, "fingerprint={}", fingerprint),
            IterationRef::IncrementalVersion(version) => write!(f, "version=v{}", version),
        }
    }
}

impl From<&Iteration> for IterationRef {
    fn from(iteration: &Iteration) -> Self {
        IterationRef::Id(iteration.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn iteration(version: u32, revoke_at: Option<DateTime<Utc>>) -> Iteration {
        Iteration {
            id: "01H".to_string(),
            bucket_slug: "img".to_string(),
            fingerprint: "abc".to_string(),
            incremental_version: version,
            complete: version > 0,
            revoke_at,
            builds: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_from_fields_precedence() {
        assert_eq!(
            IterationRef::from_fields("x", "y", 5),
            Some(IterationRef::Id("x".to_string()))
        );
        assert_eq!(
            IterationRef::from_fields("", "y", 5),
            Some(IterationRef::Fingerprint("y".to_string()))
        );
        assert_eq!(
            IterationRef::from_fields("", "", 5),
            Some(IterationRef::IncrementalVersion(5))
        );
        assert_eq!(IterationRef::from_fields("", "", 0), None);
    }

    #[test]
    fn test_published_and_revoked() {
        let now = Utc::now();
        assert!(!iteration(0, None).is_published());
        assert!(iteration(3, None).is_published());
        assert!(!iteration(3, None).is_revoked(now));
        assert!(iteration(3, Some(now - Duration::minutes(1))).is_revoked(now));
        assert!(!iteration(3, Some(now + Duration::minutes(1))).is_revoked(now));
    }

    #[test]
    fn test_ref_matches() {
        let it = iteration(4, None);
        assert!(IterationRef::Id("01H".to_string()).matches(&it));
        assert!(IterationRef::Fingerprint("abc".to_string()).matches(&it));
        assert!(IterationRef::IncrementalVersion(4).matches(&it));
        assert!(!IterationRef::IncrementalVersion(5).matches(&it));
    }
}
