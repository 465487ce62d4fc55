//! Error type for `medrec-store-sqlite`.

use medrec_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date parse error: {0}")]
  DateParse(#[from] chrono::ParseError),

  /// The unique index on `patients.email` rejected a write.
  #[error("email already in use: {0}")]
  EmailTaken(String),

  /// An update targeted a row that does not exist.
  #[error("patient not found: {0}")]
  PatientNotFound(uuid::Uuid),
}

impl From<Error> for StoreError {
  fn from(e: Error) -> Self {
    match e {
      Error::EmailTaken(email) => StoreError::EmailTaken(email),
      Error::PatientNotFound(id) => StoreError::Missing(id),
      other => StoreError::Backend(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
