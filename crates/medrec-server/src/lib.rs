//! Wiring for the medrec server: configuration and the event relay task.
//!
//! The binary in `main.rs` reads config, opens the store, builds the billing
//! client and channel publisher, spawns [`relay_events`], and serves the
//! router from `medrec-api`.

use medrec_core::events::PatientCreated;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedReceiver;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `MEDREC_*` environment overrides.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  pub billing_base_url: String,
  /// Optional bearer token for the billing service.
  #[serde(default)]
  pub billing_token:    Option<String>,
}

// ─── Event relay ─────────────────────────────────────────────────────────────

/// Drain the lifecycle event channel.
///
/// Currently each event is logged; this task is the attachment point for a
/// real stream producer. Consumers get no delivery guarantee — the publish
/// side is fire-and-forget by contract.
pub async fn relay_events(mut rx: UnboundedReceiver<PatientCreated>) {
  while let Some(event) = rx.recv().await {
    tracing::info!(
      patient_id = %event.id,
      email = %event.email,
      "patient lifecycle event: created"
    );
  }
  tracing::debug!("event relay channel closed");
}

// ─── Integration tests ────────────────────────────────────────────────────────
