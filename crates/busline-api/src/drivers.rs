//! Handlers for `/drivers` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/drivers` | Body: [`NewDriver`]; returns 201 + `{"driver_id": n}` |
//! | `GET`  | `/drivers/:id` | 404 if not found |
//! | `PUT`  | `/drivers/:id/license` | Body: `{"license_number": "...", "license_expiry": n}` |
//! | `PUT`  | `/drivers/:id/active` | Body: `{"active": bool}` |
//! | `GET`  | `/drivers/:id/eligibility` | Optional `?at=<unix seconds>`; defaults to now |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use busline_core::{
  UnixTime,
  driver::{Driver, DriverId, NewDriver},
  eligibility::Eligibility,
  store::KeyedStore,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Registry, error::ApiError};

// ─── Register ─────────────────────────────────────────────────────────────────

/// `POST /drivers`
pub async fn register<S: KeyedStore>(
  State(registry): State<Registry<S>>,
  Json(body): Json<NewDriver>,
) -> Result<impl IntoResponse, ApiError> {
  let driver_id = registry.register_driver(body).await?;
  Ok((StatusCode::CREATED, Json(json!({ "driver_id": driver_id }))))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /drivers/:id`
pub async fn get_one<S: KeyedStore>(
  State(registry): State<Registry<S>>,
  Path(id): Path<DriverId>,
) -> Result<Json<Driver>, ApiError> {
  let driver = registry
    .get_driver(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("driver {id} not found")))?;
  Ok(Json(driver))
}

// ─── License ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LicenseBody {
  pub license_number: String,
  pub license_expiry: UnixTime,
}

/// `PUT /drivers/:id/license`
pub async fn update_license<S: KeyedStore>(
  State(registry): State<Registry<S>>,
  Path(id): Path<DriverId>,
  Json(body): Json<LicenseBody>,
) -> Result<Json<bool>, ApiError> {
  let ok = registry
    .update_driver_license(id, body.license_number, body.license_expiry)
    .await?;
  Ok(Json(ok))
}

// ─── Active flag ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ActiveBody {
  pub active: bool,
}

/// `PUT /drivers/:id/active`
pub async fn set_active<S: KeyedStore>(
  State(registry): State<Registry<S>>,
  Path(id): Path<DriverId>,
  Json(body): Json<ActiveBody>,
) -> Result<Json<bool>, ApiError> {
  Ok(Json(registry.set_driver_active(id, body.active).await?))
}

// ─── Eligibility ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EligibilityParams {
  /// Evaluation time in Unix seconds. Defaults to now.
  pub at: Option<UnixTime>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EligibilityResponse {
  pub driver_id:  DriverId,
  pub at:         UnixTime,
  pub eligible:   bool,
  #[serde(flatten)]
  pub predicates: Eligibility,
}

/// `GET /drivers/:id/eligibility[?at=<unix seconds>]`
pub async fn eligibility<S: KeyedStore>(
  State(registry): State<Registry<S>>,
  Path(id): Path<DriverId>,
  Query(params): Query<EligibilityParams>,
) -> Result<Json<EligibilityResponse>, ApiError> {
  let at = params.at.unwrap_or_else(|| Utc::now().timestamp());
  let predicates = registry.driver_eligibility(id, at).await?;
  Ok(Json(EligibilityResponse {
    driver_id: id,
    at,
    eligible: predicates.is_eligible(),
    predicates,
  }))
}
