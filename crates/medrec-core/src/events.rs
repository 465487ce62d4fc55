//! Lifecycle event payloads and the `EventPublisher` trait.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::patient::Patient;

/// Emitted exactly once per successful create, mirroring the persisted
/// record at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientCreated {
  pub id:            Uuid,
  pub name:          String,
  pub email:         String,
  pub address:       String,
  pub date_of_birth: NaiveDate,
}

impl From<&Patient> for PatientCreated {
  fn from(p: &Patient) -> Self {
    Self {
      id:            p.id,
      name:          p.name.clone(),
      email:         p.email.clone(),
      address:       p.address.clone(),
      date_of_birth: p.date_of_birth,
    }
  }
}

/// Fire-and-forget emission to the lifecycle stream.
///
/// Implementations must not block the caller and must not surface delivery
/// failures — a failed publish never aborts or rolls back the create that
/// triggered it.
pub trait EventPublisher: Send + Sync {
  fn publish(&self, event: PatientCreated);
}
