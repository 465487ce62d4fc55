//! Error taxonomy for registry operations.
//!
//! Every variant is a distinct, caller-visible failure category. Nothing is
//! retried internally; only event-publish failures are swallowed, and those
//! never reach this type.

use thiserror::Error;
use uuid::Uuid;

use crate::{billing::BillingError, store::StoreError};

#[derive(Debug, Error)]
pub enum Error {
  /// The referenced identifier does not exist (update only).
  #[error("patient not found: {0}")]
  NotFound(Uuid),

  /// The email uniqueness invariant would be violated.
  #[error("a patient already exists with this email: {0}")]
  EmailConflict(String),

  /// Malformed date or missing required field.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// The underlying store is unreachable or rejected the operation.
  #[error("storage failure: {0}")]
  Storage(#[source] StoreError),

  /// The billing provisioning remote call failed. When this follows a
  /// successful create write, the local record persists regardless.
  #[error("billing provisioning failed: {0}")]
  Billing(#[from] BillingError),
}

impl From<StoreError> for Error {
  /// The storage-level unique index is the authoritative uniqueness guard;
  /// the race loser's constraint violation maps to the same conflict the
  /// advisory pre-check reports.
  fn from(e: StoreError) -> Self {
    match e {
      StoreError::EmailTaken(email) => Error::EmailConflict(email),
      StoreError::Missing(id) => Error::NotFound(id),
      other => Error::Storage(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
