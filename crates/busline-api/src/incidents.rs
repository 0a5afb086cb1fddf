//! Handlers for safety incidents.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/drivers/:id/incidents` | Body: [`NewIncident`]; returns 201 + `{"incident_id": n}` |
//! | `GET`  | `/drivers/:id/incidents` | The driver plus its incidents, in id order |
//! | `GET`  | `/incidents/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use busline_core::{
  Error,
  driver::DriverId,
  incident::{IncidentId, NewIncident, SafetyIncident},
  registry::DriverHistory,
  store::KeyedStore,
};
use serde_json::json;

use crate::{Registry, error::ApiError};

/// `POST /drivers/:id/incidents`
pub async fn record<S: KeyedStore>(
  State(registry): State<Registry<S>>,
  Path(driver_id): Path<DriverId>,
  Json(body): Json<NewIncident>,
) -> Result<impl IntoResponse, ApiError> {
  let incident_id = registry.record_safety_incident(driver_id, body).await?;
  Ok((StatusCode::CREATED, Json(json!({ "incident_id": incident_id }))))
}

/// `GET /incidents/:id`
pub async fn get_one<S: KeyedStore>(
  State(registry): State<Registry<S>>,
  Path(id): Path<IncidentId>,
) -> Result<Json<SafetyIncident>, ApiError> {
  let incident = registry
    .get_incident(id)
    .await?
    .ok_or(Error::IncidentNotFound(id))?;
  Ok(Json(incident))
}

/// `GET /drivers/:id/incidents`
pub async fn history<S: KeyedStore>(
  State(registry): State<Registry<S>>,
  Path(driver_id): Path<DriverId>,
) -> Result<Json<DriverHistory>, ApiError> {
  Ok(Json(registry.driver_history(driver_id).await?))
}
