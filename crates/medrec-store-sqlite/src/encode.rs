//! Row/column encoding between `medrec_core` types and SQLite TEXT columns.

use chrono::NaiveDate;
use medrec_core::patient::Patient;
use uuid::Uuid;

use crate::Result;

pub fn encode_uuid(id: Uuid) -> String {
  id.to_string()
}

/// ISO `YYYY-MM-DD`, matching the external representation.
pub fn encode_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

/// A `patients` row as read from SQLite, before parsing.
pub struct RawPatient {
  pub patient_id:    String,
  pub name:          String,
  pub address:       String,
  pub email:         String,
  pub date_of_birth: String,
}

impl RawPatient {
  pub fn into_patient(self) -> Result<Patient> {
    Ok(Patient {
      id:            Uuid::parse_str(&self.patient_id)?,
      name:          self.name,
      address:       self.address,
      email:         self.email,
      date_of_birth: self.date_of_birth.parse::<NaiveDate>()?,
    })
  }
}
