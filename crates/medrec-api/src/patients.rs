//! Handlers for `/patients` endpoints.
//!
//! | Method   | Path             | Notes                                    |
//! |----------|------------------|------------------------------------------|
//! | `GET`    | `/patients`      | All records, no filtering, no pagination |
//! | `POST`   | `/patients`      | 201 on success; 409 on email conflict    |
//! | `PUT`    | `/patients/{id}` | 404 before 409; own email never 409      |
//! | `DELETE` | `/patients/{id}` | 204 always, absent id included           |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use medrec_core::{
  PatientRegistry, billing::BillingNotifier, events::EventPublisher,
  patient::{Patient, PatientDraft}, store::PatientStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

/// External representation of a patient; internal-only fields stay out and
/// the date of birth is the `YYYY-MM-DD` string form.
#[derive(Debug, Serialize)]
pub struct PatientRepr {
  pub id:            Uuid,
  pub name:          String,
  pub address:       String,
  pub email:         String,
  pub date_of_birth: String,
}

impl From<Patient> for PatientRepr {
  fn from(p: Patient) -> Self {
    Self {
      id:            p.id,
      name:          p.name,
      address:       p.address,
      email:         p.email,
      date_of_birth: p.date_of_birth.format("%Y-%m-%d").to_string(),
    }
  }
}

/// `GET /patients`
pub async fn list<S, B, E>(
  State(registry): State<Arc<PatientRegistry<S, B, E>>>,
) -> Result<Json<Vec<PatientRepr>>, ApiError>
where
  S: PatientStore,
  B: BillingNotifier,
  E: EventPublisher,
{
  let patients = registry.list().await?;
  Ok(Json(patients.into_iter().map(PatientRepr::from).collect()))
}

/// `POST /patients`
pub async fn create<S, B, E>(
  State(registry): State<Arc<PatientRegistry<S, B, E>>>,
  Json(draft): Json<PatientDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PatientStore,
  B: BillingNotifier,
  E: EventPublisher,
{
  let patient = registry.create(&draft).await?;
  Ok((StatusCode::CREATED, Json(PatientRepr::from(patient))))
}

/// `PUT /patients/{id}`
pub async fn update<S, B, E>(
  State(registry): State<Arc<PatientRegistry<S, B, E>>>,
  Path(id): Path<Uuid>,
  Json(draft): Json<PatientDraft>,
) -> Result<Json<PatientRepr>, ApiError>
where
  S: PatientStore,
  B: BillingNotifier,
  E: EventPublisher,
{
  let patient = registry.update(id, &draft).await?;
  Ok(Json(PatientRepr::from(patient)))
}

/// `DELETE /patients/{id}` — idempotent, succeeds for absent ids too.
pub async fn delete<S, B, E>(
  State(registry): State<Arc<PatientRegistry<S, B, E>>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: PatientStore,
  B: BillingNotifier,
  E: EventPublisher,
{
  registry.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
