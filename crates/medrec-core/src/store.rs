//! The `PatientStore` trait — the durable-storage contract.
//!
//! The trait is implemented by storage backends (e.g. `medrec-store-sqlite`).
//! The registry depends on this abstraction, not on any concrete backend.
//! All operations are atomic at single-record granularity; no multi-record
//! transaction spans a registry operation.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::patient::{NewPatient, Patient};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Failures a storage backend can surface to the registry.
#[derive(Debug, Error)]
pub enum StoreError {
  /// A write was rejected by the storage-level unique constraint on email.
  #[error("email already in use: {0}")]
  EmailTaken(String),

  /// A write referenced a row that no longer exists.
  #[error("no stored patient with id {0}")]
  Missing(Uuid),

  /// The backend is unreachable or rejected the operation for another
  /// reason.
  #[error("storage backend error: {0}")]
  Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over durable keyed storage of patient records.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`).
pub trait PatientStore: Send + Sync {
  /// Full scan of all records, in a deterministic order.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Patient>, StoreError>> + Send + '_;

  /// Point lookup by identifier. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Patient>, StoreError>> + Send + '_;

  /// Persist a new record; the store assigns the identifier.
  ///
  /// The store's unique index on email is the authoritative uniqueness
  /// guard — a violation surfaces as [`StoreError::EmailTaken`] even when
  /// the registry's advisory pre-check passed.
  fn insert(
    &self,
    new: NewPatient,
  ) -> impl Future<Output = Result<Patient, StoreError>> + Send + '_;

  /// Overwrite an existing record in place. The identifier never changes.
  ///
  /// Returns [`StoreError::Missing`] if the row disappeared between the
  /// registry's lookup and the write.
  fn update<'a>(
    &'a self,
    patient: &'a Patient,
  ) -> impl Future<Output = Result<Patient, StoreError>> + Send + 'a;

  /// Remove the record keyed by `id`. Removing an absent id is not an
  /// error — deletion is idempotent by construction.
  fn delete_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), StoreError>> + Send + '_;

  /// Whether any record holds `email`.
  fn exists_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<bool, StoreError>> + Send + 'a;

  /// Whether any record other than `id` holds `email` — used by update so a
  /// record may keep its own email.
  fn exists_by_email_excluding<'a>(
    &'a self,
    email: &'a str,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, StoreError>> + Send + 'a;
}
