//! The `BillingNotifier` trait — the billing provisioning contract.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

/// A billing remote-call failure. Neither variant is retried or queued by
/// the registry; both propagate directly to the caller.
#[derive(Debug, Error)]
pub enum BillingError {
  /// The billing service could not be reached.
  #[error("billing service unreachable: {0}")]
  Unreachable(String),

  /// The billing service answered but rejected the request.
  #[error("billing service rejected the request (status {status}): {message}")]
  Rejected { status: u16, message: String },
}

/// Synchronous remote provisioning of a billing account for a newly created
/// patient. The registry awaits the call; it blocks the create operation
/// until the remote side answers or the transport times out.
pub trait BillingNotifier: Send + Sync {
  fn create_billing_account<'a>(
    &'a self,
    patient_id: Uuid,
    name: &'a str,
    email: &'a str,
  ) -> impl Future<Output = Result<(), BillingError>> + Send + 'a;
}
