//! Core types and trait definitions for the medrec patient registry.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! defines the [`Patient`](patient::Patient) entity, the contracts for the
//! three external collaborators (durable store, billing provisioner, event
//! stream), and the [`PatientRegistry`](registry::PatientRegistry) that
//! sequences persistence and downstream side effects around them.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod billing;
pub mod error;
pub mod events;
pub mod patient;
pub mod registry;
pub mod store;

pub use error::{Error, Result};
pub use registry::PatientRegistry;
