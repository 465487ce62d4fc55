//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use medrec_core::patient::NewPatient;
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_patient(name: &str, email: &str) -> NewPatient {
  NewPatient {
    name:          name.into(),
    address:       "1 Main St".into(),
    email:         email.into(),
    date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
  }
}

// ─── Insert & lookup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_id_and_roundtrips() {
  let s = store().await;

  let ana = s.insert(new_patient("Ana", "ana@x.com")).await.unwrap();
  assert!(!ana.id.is_nil());

  let fetched = s.find_by_id(ana.id).await.unwrap().unwrap();
  assert_eq!(fetched, ana);
  assert_eq!(fetched.name, "Ana");
  assert_eq!(fetched.address, "1 Main St");
  assert_eq!(fetched.email, "ana@x.com");
  assert_eq!(
    fetched.date_of_birth,
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
  );
}

#[tokio::test]
async fn find_by_id_missing_returns_none() {
  let s = store().await;
  assert!(s.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn find_all_is_ordered_by_name() {
  let s = store().await;
  s.insert(new_patient("carol", "carol@x.com")).await.unwrap();
  s.insert(new_patient("Ana", "ana@x.com")).await.unwrap();
  s.insert(new_patient("Bea", "bea@x.com")).await.unwrap();

  let names: Vec<_> = s
    .find_all()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.name)
    .collect();
  assert_eq!(names, ["Ana", "Bea", "carol"]);
}

// ─── Unique email constraint ─────────────────────────────────────────────────

#[tokio::test]
async fn insert_duplicate_email_is_email_taken() {
  let s = store().await;
  s.insert(new_patient("Ana", "ana@x.com")).await.unwrap();

  let err = s.insert(new_patient("Bea", "ana@x.com")).await.unwrap_err();
  assert!(matches!(err, Error::EmailTaken(ref e) if e == "ana@x.com"));

  // The losing insert left nothing behind.
  assert_eq!(s.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_to_taken_email_is_email_taken() {
  let s = store().await;
  s.insert(new_patient("Ana", "ana@x.com")).await.unwrap();
  let mut bea = s.insert(new_patient("Bea", "bea@x.com")).await.unwrap();

  bea.email = "ana@x.com".into();
  let err = s.update(&bea).await.unwrap_err();
  assert!(matches!(err, Error::EmailTaken(_)));

  // Bea's row is untouched.
  let stored = s.find_by_id(bea.id).await.unwrap().unwrap();
  assert_eq!(stored.email, "bea@x.com");
}

#[tokio::test]
async fn exists_by_email() {
  let s = store().await;
  s.insert(new_patient("Ana", "ana@x.com")).await.unwrap();

  assert!(s.exists_by_email("ana@x.com").await.unwrap());
  assert!(!s.exists_by_email("bea@x.com").await.unwrap());
}

#[tokio::test]
async fn exists_by_email_excluding_skips_own_row() {
  let s = store().await;
  let ana = s.insert(new_patient("Ana", "ana@x.com")).await.unwrap();
  let bea = s.insert(new_patient("Bea", "bea@x.com")).await.unwrap();

  // A record keeping its own email is not a conflict.
  assert!(
    !s.exists_by_email_excluding("ana@x.com", ana.id).await.unwrap()
  );
  // Another record's email is.
  assert!(
    s.exists_by_email_excluding("ana@x.com", bea.id).await.unwrap()
  );
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_overwrites_all_mutable_fields() {
  let s = store().await;
  let mut ana = s.insert(new_patient("Ana", "ana@x.com")).await.unwrap();

  ana.name = "Ana Maria".into();
  ana.address = "2 Oak Ave".into();
  ana.email = "ana.maria@x.com".into();
  ana.date_of_birth = NaiveDate::from_ymd_opt(1991, 2, 2).unwrap();
  s.update(&ana).await.unwrap();

  let stored = s.find_by_id(ana.id).await.unwrap().unwrap();
  assert_eq!(stored, ana);
}

#[tokio::test]
async fn update_missing_row_errors() {
  let s = store().await;
  let mut ghost = s.insert(new_patient("Ana", "ana@x.com")).await.unwrap();
  s.delete_by_id(ghost.id).await.unwrap();

  ghost.name = "Ghost".into();
  let err = s.update(&ghost).await.unwrap_err();
  assert!(matches!(err, Error::PatientNotFound(id) if id == ghost.id));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_row_and_frees_email() {
  let s = store().await;
  let ana = s.insert(new_patient("Ana", "ana@x.com")).await.unwrap();

  s.delete_by_id(ana.id).await.unwrap();
  assert!(s.find_by_id(ana.id).await.unwrap().is_none());

  // The unique slot is released by the hard delete.
  s.insert(new_patient("Ana II", "ana@x.com")).await.unwrap();
}

#[tokio::test]
async fn delete_absent_id_is_a_noop() {
  let s = store().await;
  s.delete_by_id(Uuid::new_v4()).await.unwrap();

  let ana = s.insert(new_patient("Ana", "ana@x.com")).await.unwrap();
  s.delete_by_id(ana.id).await.unwrap();
  s.delete_by_id(ana.id).await.unwrap();
}
