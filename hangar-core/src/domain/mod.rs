//! Core domain types
//!
//! This module contains the domain structures for the remote image registry.
//! Every entity is owned by the remote service; these types are transient,
//! request-scoped representations shared by the client (for decoding) and the
//! reconciler (for branching and for exposing observable state).

pub mod bucket;
pub mod build;
pub mod channel;
pub mod iteration;
pub mod location;
pub mod network;
pub mod operation;
pub mod registry;
pub mod run_task;
