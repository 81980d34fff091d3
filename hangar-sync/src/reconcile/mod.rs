//! Hierarchical upsert reconciler
//!
//! Drives the registry → bucket → iteration → build → channel tree toward a
//! desired state. Every upsert follows the same protocol:
//!
//! 1. Attempt to create the node.
//! 2. On success, await the returned operation (if any) and return the node.
//! 3. On failure, classify the error:
//!    - `ALREADY_EXISTS` (or a bare 409) is benign for registries, buckets,
//!      iterations and channels and is followed by a compensating read;
//!    - `ABORTED` (or a bare 409) is benign for builds, meaning a concurrent
//!      run already claimed the component;
//!    - everything else is fatal and propagated.
//!
//! Levels are issued strictly in sequence; no client-side locking is used.

mod bucket;
mod build;
mod channel;
mod iteration;
mod registry;

pub use build::BuildPublication;

use std::sync::Arc;

use hangar_client::{ClientError, RegistryApi, RpcCode};
use hangar_core::domain::location::Location;
use hangar_core::domain::operation::Operation;

use crate::config::SyncConfig;
use crate::error::Result;
use crate::operation::OperationTracker;

/// Kind of node in the resource tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Registry,
    Bucket,
    Iteration,
    Build,
    Channel,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Registry => write!(f, "registry"),
            NodeKind::Bucket => write!(f, "bucket"),
            NodeKind::Iteration => write!(f, "iteration"),
            NodeKind::Build => write!(f, "build"),
            NodeKind::Channel => write!(f, "channel"),
        }
    }
}

/// Classification of a failed create
#[derive(Debug)]
pub enum UpsertError {
    /// The node already exists; read it instead
    AlreadyExists(ClientError),
    /// A concurrent writer owns the node; nothing more to do
    Aborted(ClientError),
    /// Propagate to the caller
    Fatal(ClientError),
}

impl UpsertError {
    /// Classifies a create failure for the given node kind
    pub fn classify(err: ClientError, kind: NodeKind) -> Self {
        let code = err.rpc_code();
        let conflict = err.is_conflict();

        match kind {
            NodeKind::Build if code == Some(RpcCode::Aborted) || conflict => {
                UpsertError::Aborted(err)
            }
            NodeKind::Build => UpsertError::Fatal(err),
            _ if code == Some(RpcCode::AlreadyExists) || conflict => {
                UpsertError::AlreadyExists(err)
            }
            _ => UpsertError::Fatal(err),
        }
    }

    /// The original error
    pub fn into_inner(self) -> ClientError {
        match self {
            UpsertError::AlreadyExists(err)
            | UpsertError::Aborted(err)
            | UpsertError::Fatal(err) => err,
        }
    }
}

/// Reconciles desired registry state against the remote service
///
/// Holds only shared, immutable collaborators, so one reconciler can serve
/// concurrent requests.
pub struct Reconciler<A: ?Sized> {
    api: Arc<A>,
    config: SyncConfig,
    tracker: OperationTracker<A>,
}

impl<A: RegistryApi + ?Sized> Reconciler<A> {
    /// Creates a reconciler
    ///
    /// # Arguments
    /// * `api` - Remote registry implementation
    /// * `config` - Poller and paginator settings
    ///
    /// # Returns
    /// [`SyncError::InvalidConfig`](crate::SyncError::InvalidConfig) when
    /// `config` does not validate
    pub fn new(api: Arc<A>, config: SyncConfig) -> Result<Self> {
        let tracker = OperationTracker::new(Arc::clone(&api), &config)?;
        Ok(Self {
            api,
            config,
            tracker,
        })
    }

    /// Awaits the operation returned by a mutation, if there is one
    async fn await_operation(
        &self,
        location: &Location,
        operation: Option<&Operation>,
        description: &str,
    ) -> Result<()> {
        if let Some(operation) = operation {
            self.tracker
                .wait(location, &operation.id, description)
                .await?;
        }
        Ok(())
    }
}

/// Treats a "not found" answer to a delete as success
///
/// Returns whether something was actually deleted.
fn deleted_or_missing(result: hangar_client::Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.is_not_found() => Ok(false),
        Err(err) => Err(err.into()),
    }
}
