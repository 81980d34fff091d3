//! Run-task credential rotator
//!
//! Reads and rotates the per-project endpoint/HMAC pair that external CI
//! systems use to report back to the registry.

use std::sync::Arc;

use hangar_client::RegistryApi;
use hangar_core::domain::location::Location;
use hangar_core::domain::run_task::RunTaskCredential;
use tracing::info;

use crate::error::Result;

/// Outcome of reconciling the run-task credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTaskReconciliation {
    pub credential: RunTaskCredential,

    /// Whether the key was rotated by this call
    ///
    /// Rotation is requested on every reconcile with the flag set, so callers
    /// that persist the credential will always observe a change.
    pub rotated: bool,
}

/// Reads and rotates run-task credentials
pub struct RunTaskRotator<A: ?Sized> {
    api: Arc<A>,
}

impl<A: RegistryApi + ?Sized> RunTaskRotator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Reads the current credential; the key is stable across reads
    pub async fn get(&self, location: &Location) -> Result<RunTaskCredential> {
        Ok(self.api.get_run_task(location).await?)
    }

    /// Issues a new key, invalidating the previous one
    pub async fn regenerate(&self, location: &Location) -> Result<RunTaskCredential> {
        info!("Regenerating run-task HMAC key ({})", location);
        Ok(self.api.regenerate_run_task_hmac(location).await?)
    }

    /// Reads the credential, rotating the key first when `regenerate_hmac` is set
    pub async fn reconcile(
        &self,
        location: &Location,
        regenerate_hmac: bool,
    ) -> Result<RunTaskReconciliation> {
        if regenerate_hmac {
            let credential = self.regenerate(location).await?;
            return Ok(RunTaskReconciliation {
                credential,
                rotated: true,
            });
        }

        Ok(RunTaskReconciliation {
            credential: self.get(location).await?,
            rotated: false,
        })
    }
}
