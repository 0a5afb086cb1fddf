//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use busline_core::error::{CODE_NOT_FOUND, CODE_STORAGE};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// The body is always `{"error": <message>, "code": <n>}`, where `code` is the
/// registry's numeric discriminant.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] busline_core::Error),
}

impl From<busline_core::Error> for ApiError {
  fn from(e: busline_core::Error) -> Self {
    if e.is_not_found() {
      ApiError::NotFound(e.to_string())
    } else {
      ApiError::Store(e)
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, code, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, CODE_NOT_FOUND, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, CODE_STORAGE, e.to_string())
      }
    };
    (status, Json(json!({ "error": message, "code": code }))).into_response()
  }
}
