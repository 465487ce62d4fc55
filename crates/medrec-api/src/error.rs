//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use medrec_core::Error;
use serde_json::json;

/// A registry failure surfaced as an HTTP response.
///
/// Every category from the core taxonomy keeps its own status:
/// `InvalidInput` 400, `NotFound` 404, `EmailConflict` 409, `Billing` 502
/// (the create may have committed locally — see the registry docs),
/// `Storage` 500.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self.0 {
      Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::EmailConflict(_) => StatusCode::CONFLICT,
      Error::Billing(_) => StatusCode::BAD_GATEWAY,
      Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": self.0.to_string() }))).into_response()
  }
}
