//! `PatientRegistry` — the lifecycle orchestrator.
//!
//! Sequencing contract for create: advisory uniqueness check, durable write,
//! synchronous billing provisioning, fire-and-forget event publish — in that
//! order, each only after the previous succeeded. Update and delete touch
//! the store only.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  billing::BillingNotifier,
  events::{EventPublisher, PatientCreated},
  patient::{Patient, PatientDraft},
  store::PatientStore,
};

/// The patient lifecycle orchestrator.
///
/// Stateless between calls; each operation runs independently and may
/// execute concurrently with others. No in-process lock spans the
/// check-then-write in create/update — the store's unique index is the
/// authoritative guard and the pre-check is the advisory fast path.
///
/// Collaborators are constructor-injected; the registry holds no ambient
/// globals.
pub struct PatientRegistry<S, B, E> {
  store:     Arc<S>,
  billing:   Arc<B>,
  publisher: Arc<E>,
}

impl<S, B, E> PatientRegistry<S, B, E>
where
  S: PatientStore,
  B: BillingNotifier,
  E: EventPublisher,
{
  pub fn new(store: Arc<S>, billing: Arc<B>, publisher: Arc<E>) -> Self {
    Self { store, billing, publisher }
  }

  /// All patient records, in the store's deterministic order. No filtering,
  /// no pagination.
  pub async fn list(&self) -> Result<Vec<Patient>> {
    Ok(self.store.find_all().await?)
  }

  /// Create a patient, then provision billing and publish the lifecycle
  /// event.
  ///
  /// # Errors
  ///
  /// - [`Error::EmailConflict`] before any write if the email is taken
  ///   (advisory pre-check), or from the store's unique index if a
  ///   concurrent create won the race.
  /// - [`Error::InvalidInput`] for a missing field, malformed email, or
  ///   unparseable date of birth.
  /// - [`Error::Storage`] if persistence fails; no downstream call is made.
  /// - [`Error::Billing`] if provisioning fails *after* the write committed:
  ///   the local record persists, so callers must treat a failed create as
  ///   potentially having created the record.
  pub async fn create(&self, draft: &PatientDraft) -> Result<Patient> {
    if self.store.exists_by_email(&draft.email).await? {
      return Err(Error::EmailConflict(draft.email.clone()));
    }

    let new = draft.validate()?;
    let patient = self.store.insert(new).await?;

    // Strictly after persistence. Awaited; a failure propagates unretried.
    self
      .billing
      .create_billing_account(patient.id, &patient.name, &patient.email)
      .await?;

    // Dispatched without waiting on delivery; a publish failure can neither
    // fail nor roll back the create.
    self.publisher.publish(PatientCreated::from(&patient));

    Ok(patient)
  }

  /// Replace a record's name, address, email, and date of birth. The
  /// identifier is untouched.
  ///
  /// No billing call and no event on update — only creation triggers
  /// downstream propagation.
  ///
  /// # Errors
  ///
  /// - [`Error::NotFound`] if `id` does not exist; the uniqueness check is
  ///   skipped entirely in that case.
  /// - [`Error::EmailConflict`] if another record holds the new email (the
  ///   record's own current email is excluded from the comparison).
  /// - [`Error::InvalidInput`] for a malformed replacement field.
  pub async fn update(&self, id: Uuid, draft: &PatientDraft) -> Result<Patient> {
    let mut patient = self
      .store
      .find_by_id(id)
      .await?
      .ok_or(Error::NotFound(id))?;

    if self.store.exists_by_email_excluding(&draft.email, id).await? {
      return Err(Error::EmailConflict(draft.email.clone()));
    }

    let new = draft.validate()?;
    patient.name = new.name;
    patient.address = new.address;
    patient.email = new.email;
    patient.date_of_birth = new.date_of_birth;

    Ok(self.store.update(&patient).await?)
  }

  /// Unconditionally remove the record keyed by `id`. No existence check,
  /// no error for an absent id, no downstream notification.
  pub async fn delete(&self, id: Uuid) -> Result<()> {
    Ok(self.store.delete_by_id(id).await?)
  }
}
