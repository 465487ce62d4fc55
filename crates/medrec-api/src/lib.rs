//! JSON REST API for the medrec patient registry.
//!
//! Exposes an axum [`Router`] backed by a
//! [`PatientRegistry`](medrec_core::PatientRegistry) over any store, billing,
//! and publisher implementations. Auth, TLS, and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", medrec_api::api_router(registry.clone()))
//! ```

pub mod error;
pub mod patients;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use medrec_core::{
  PatientRegistry, billing::BillingNotifier, events::EventPublisher,
  store::PatientStore,
};

pub use error::ApiError;

/// Build a fully-materialised API router for `registry`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, B, E>(
  registry: Arc<PatientRegistry<S, B, E>>,
) -> Router<()>
where
  S: PatientStore + 'static,
  B: BillingNotifier + 'static,
  E: EventPublisher + 'static,
{
  Router::new()
    .route(
      "/patients",
      get(patients::list::<S, B, E>).post(patients::create::<S, B, E>),
    )
    .route(
      "/patients/{id}",
      put(patients::update::<S, B, E>).delete(patients::delete::<S, B, E>),
    )
    .with_state(registry)
}
