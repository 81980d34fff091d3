//! Hangar Core
//!
//! Core types for the Hangar image-registry reconciliation client.
//!
//! This crate contains:
//! - Domain types: the registry resource tree (Registry, Bucket, Iteration, Build, Channel)
//!   plus the supporting Location, Operation, run-task and network records
//! - DTOs: request bodies and response envelopes exchanged with the remote service

pub mod domain;
pub mod dto;
