//! Hangar Sync
//!
//! Keeps image-registry state (registry → bucket → iteration → build →
//! channel) in line with a declared desired state.
//!
//! Components:
//! - Backoff poller: jittered exponential retry with an elapsed-time budget
//! - Operation tracker: awaits asynchronous remote operations
//! - Paginator: drains cursor-paged listings
//! - Reconciler: conflict-tolerant upserts, channel assignment, deletes
//! - Run-task rotator: reads and regenerates the run-task HMAC key
//!
//! Everything is written against [`hangar_client::RegistryApi`], so the same
//! code runs against the HTTP client and against in-memory fakes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use hangar_client::RegistryClient;
//! use hangar_core::domain::location::Location;
//! use hangar_sync::desired::BucketSpec;
//! use hangar_sync::{Reconciler, SyncConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Arc::new(RegistryClient::new("http://localhost:8080"));
//! let reconciler = Reconciler::new(client, SyncConfig::default())?;
//! let location = Location::new("my-org", "my-project");
//!
//! let bucket = reconciler.upsert_bucket(&location, &BucketSpec::new("img-1")).await?;
//! let iteration = reconciler.upsert_iteration(&location, &bucket.slug, "abc123").await?;
//! println!("iteration {}", iteration.id);
//! # Ok(())
//! # }
//! ```

pub mod backoff;
pub mod config;
pub mod desired;
pub mod error;
pub mod operation;
pub mod paginate;
pub mod reconcile;
pub mod run_task;

#[cfg(test)]
mod testing;

pub use config::SyncConfig;
pub use error::{Result, SyncError};
pub use reconcile::{BuildPublication, Reconciler};
pub use run_task::{RunTaskReconciliation, RunTaskRotator};
