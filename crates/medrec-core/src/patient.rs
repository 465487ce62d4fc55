//! Patient — the sole entity managed by the registry.
//!
//! A record is created from a validated request, mutated in place by update,
//! and hard-deleted. No soft-delete, no versioning.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// A persisted patient record.
///
/// The identifier is assigned by the store at insert and never reassigned.
/// Email is globally unique across the whole population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
  pub id:            Uuid,
  pub name:          String,
  pub address:       String,
  pub email:         String,
  pub date_of_birth: NaiveDate,
}

/// A validated record-to-be — everything except the identifier, which the
/// store assigns on insert.
#[derive(Debug, Clone)]
pub struct NewPatient {
  pub name:          String,
  pub address:       String,
  pub email:         String,
  pub date_of_birth: NaiveDate,
}

/// Raw inbound fields, exactly as the transport adapter received them.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientDraft {
  pub name:          String,
  pub address:       String,
  pub email:         String,
  /// Calendar date in `YYYY-MM-DD` form.
  pub date_of_birth: String,
}

impl PatientDraft {
  /// Validate the draft into a [`NewPatient`].
  ///
  /// Name and address must be non-empty, the email must be well-formed, and
  /// the date of birth must parse as a calendar date.
  pub fn validate(&self) -> Result<NewPatient> {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(Error::InvalidInput("name is required".into()));
    }
    let address = self.address.trim();
    if address.is_empty() {
      return Err(Error::InvalidInput("address is required".into()));
    }
    if !email_is_well_formed(&self.email) {
      return Err(Error::InvalidInput(format!(
        "malformed email address: {:?}",
        self.email
      )));
    }
    let date_of_birth =
      self.date_of_birth.parse::<NaiveDate>().map_err(|_| {
        Error::InvalidInput(format!(
          "date of birth must be a calendar date (YYYY-MM-DD), got {:?}",
          self.date_of_birth
        ))
      })?;

    Ok(NewPatient {
      name:    name.to_string(),
      address: address.to_string(),
      email:   self.email.clone(),
      date_of_birth,
    })
  }
}

/// Minimal structural check: one `@`, non-empty local part and domain, no
/// whitespace. Deliverability is not this crate's concern.
fn email_is_well_formed(email: &str) -> bool {
  if email.chars().any(char::is_whitespace) {
    return false;
  }
  match email.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty() && !domain.is_empty() && !domain.contains('@')
    }
    None => false,
  }
}
