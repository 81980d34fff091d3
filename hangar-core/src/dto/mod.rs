//! Data Transfer Objects for the remote registry service
//!
//! Request bodies and response envelopes exchanged with the service. Only the
//! fields the reconciler branches on or exposes are modelled; unknown fields in
//! responses are ignored.

pub mod bucket;
pub mod build;
pub mod channel;
pub mod iteration;
pub mod network;
pub mod operation;
pub mod pagination;
pub mod registry;
pub mod run_task;
