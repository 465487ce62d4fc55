//! SQL schema for the medrec SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The UNIQUE constraint on `email` is the authoritative uniqueness guard;
/// the registry's pre-check is only an advisory fast path.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS patients (
    patient_id    TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    address       TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    date_of_birth TEXT NOT NULL    -- ISO 8601 calendar date, no time component
);

CREATE INDEX IF NOT EXISTS patients_name_idx ON patients(name);

PRAGMA user_version = 1;
";
