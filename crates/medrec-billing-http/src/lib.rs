//! HTTP client implementation of
//! [`BillingNotifier`](medrec_core::billing::BillingNotifier).
//!
//! Posts a JSON provisioning request to the billing service. The call is
//! awaited by the registry; transport timeouts live here, not in the
//! orchestration layer.

use std::time::Duration;

use medrec_core::billing::{BillingError, BillingNotifier};
use reqwest::Client;
use serde::Serialize;
use uuid::Uuid;

/// Connection settings for the billing service.
#[derive(Debug, Clone)]
pub struct BillingConfig {
  pub base_url: String,
  /// Optional bearer token sent with every request.
  pub token:    Option<String>,
  pub timeout:  Duration,
}

impl BillingConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      token:    None,
      timeout:  Duration::from_secs(10),
    }
  }
}

#[derive(Serialize)]
struct CreateBillingAccountReq<'a> {
  patient_id: Uuid,
  name:       &'a str,
  email:      &'a str,
}

/// HTTP client for the billing provisioning endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpBillingClient {
  client: Client,
  config: BillingConfig,
}

impl HttpBillingClient {
  pub fn new(config: BillingConfig) -> Result<Self, BillingError> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(|e| BillingError::Unreachable(e.to_string()))?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.config.base_url.trim_end_matches('/'))
  }
}

impl BillingNotifier for HttpBillingClient {
  /// `POST /billing-accounts`
  async fn create_billing_account(
    &self,
    patient_id: Uuid,
    name: &str,
    email: &str,
  ) -> Result<(), BillingError> {
    let mut req = self
      .client
      .post(self.url("/billing-accounts"))
      .json(&CreateBillingAccountReq { patient_id, name, email });
    if let Some(token) = &self.config.token {
      req = req.bearer_auth(token);
    }

    let resp = req
      .send()
      .await
      .map_err(|e| BillingError::Unreachable(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
      let message = resp.text().await.unwrap_or_default();
      tracing::error!(%status, "billing provisioning rejected");
      return Err(BillingError::Rejected { status: status.as_u16(), message });
    }

    tracing::debug!(%patient_id, "billing account provisioned");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_joins_without_double_slash() {
    let client =
      HttpBillingClient::new(BillingConfig::new("http://billing:4000/"))
        .unwrap();
    assert_eq!(
      client.url("/billing-accounts"),
      "http://billing:4000/billing-accounts"
    );
  }
}
