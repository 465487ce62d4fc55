//! [`SqliteStore`] — the SQLite implementation of
//! [`PatientStore`](medrec_core::store::PatientStore).

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use medrec_core::{
  patient::{NewPatient, Patient},
  store::{PatientStore, StoreError},
};

use crate::{
  Error, Result,
  encode::{RawPatient, encode_date, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A patient store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// All rows, ordered by name (case-insensitive), then id for stability.
  pub async fn find_all(&self) -> Result<Vec<Patient>> {
    let raws: Vec<RawPatient> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT patient_id, name, address, email, date_of_birth
           FROM patients
           ORDER BY name COLLATE NOCASE, patient_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawPatient {
              patient_id:    row.get(0)?,
              name:          row.get(1)?,
              address:       row.get(2)?,
              email:         row.get(3)?,
              date_of_birth: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPatient::into_patient).collect()
  }

  pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPatient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT patient_id, name, address, email, date_of_birth
               FROM patients WHERE patient_id = ?1",
              rusqlite::params![id_str],
              |row| {
                Ok(RawPatient {
                  patient_id:    row.get(0)?,
                  name:          row.get(1)?,
                  address:       row.get(2)?,
                  email:         row.get(3)?,
                  date_of_birth: row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPatient::into_patient).transpose()
  }

  pub async fn exists_by_email(&self, email: &str) -> Result<bool> {
    let email = email.to_owned();
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM patients WHERE email = ?1",
              rusqlite::params![email],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  pub async fn exists_by_email_excluding(
    &self,
    email: &str,
    id: Uuid,
  ) -> Result<bool> {
    let email = email.to_owned();
    let id_str = encode_uuid(id);
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM patients WHERE email = ?1 AND patient_id != ?2",
              rusqlite::params![email, id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Insert a new record; the store assigns the identifier.
  pub async fn insert(&self, new: NewPatient) -> Result<Patient> {
    let patient = Patient {
      id:            Uuid::new_v4(),
      name:          new.name,
      address:       new.address,
      email:         new.email,
      date_of_birth: new.date_of_birth,
    };

    let id_str   = encode_uuid(patient.id);
    let name     = patient.name.clone();
    let address  = patient.address.clone();
    let email    = patient.email.clone();
    let dob_str  = encode_date(patient.date_of_birth);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO patients (patient_id, name, address, email, date_of_birth)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, address, email, dob_str],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| map_email_constraint(e, &patient.email))?;

    Ok(patient)
  }

  /// Overwrite an existing row in place; the identifier is never changed.
  pub async fn update(&self, patient: &Patient) -> Result<Patient> {
    let id_str  = encode_uuid(patient.id);
    let name    = patient.name.clone();
    let address = patient.address.clone();
    let email   = patient.email.clone();
    let dob_str = encode_date(patient.date_of_birth);

    let affected = self
      .conn
      .call(move |conn| {
        let affected = conn.execute(
          "UPDATE patients
           SET name = ?2, address = ?3, email = ?4, date_of_birth = ?5
           WHERE patient_id = ?1",
          rusqlite::params![id_str, name, address, email, dob_str],
        )?;
        Ok(affected)
      })
      .await
      .map_err(|e| map_email_constraint(e, &patient.email))?;

    if affected == 0 {
      return Err(Error::PatientNotFound(patient.id));
    }
    Ok(patient.clone())
  }

  /// Remove the row keyed by `id`. Deleting an absent id is a no-op.
  pub async fn delete_by_id(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM patients WHERE patient_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Decode a unique-index violation on `patients.email` into
/// [`Error::EmailTaken`]; everything else stays a database error.
fn map_email_constraint(e: tokio_rusqlite::Error, email: &str) -> Error {
  let is_email_unique = matches!(
    &e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, Some(msg)))
      if f.code == rusqlite::ErrorCode::ConstraintViolation
        && msg.contains("patients.email")
  );
  if is_email_unique {
    Error::EmailTaken(email.to_owned())
  } else {
    Error::Database(e)
  }
}

// ─── PatientStore impl ───────────────────────────────────────────────────────

impl PatientStore for SqliteStore {
  async fn find_all(&self) -> Result<Vec<Patient>, StoreError> {
    Ok(SqliteStore::find_all(self).await?)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>, StoreError> {
    Ok(SqliteStore::find_by_id(self, id).await?)
  }

  async fn insert(&self, new: NewPatient) -> Result<Patient, StoreError> {
    Ok(SqliteStore::insert(self, new).await?)
  }

  async fn update(&self, patient: &Patient) -> Result<Patient, StoreError> {
    Ok(SqliteStore::update(self, patient).await?)
  }

  async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
    Ok(SqliteStore::delete_by_id(self, id).await?)
  }

  async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
    Ok(SqliteStore::exists_by_email(self, email).await?)
  }

  async fn exists_by_email_excluding(
    &self,
    email: &str,
    id: Uuid,
  ) -> Result<bool, StoreError> {
    Ok(SqliteStore::exists_by_email_excluding(self, email, id).await?)
  }
}
