//! Safety incidents recorded against a driver.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{UnixTime, driver::DriverId, store::Entity};

/// Identifier allocated from the `next-incident-id` counter.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct IncidentId(pub u64);

impl fmt::Display for IncidentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// Composite store key for the `incidents` map: `{"incident_id": n}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IncidentKey {
  pub incident_id: IncidentId,
}

/// A stored incident. Never mutated once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyIncident {
  pub driver_id:   DriverId,
  pub timestamp:   UnixTime,
  pub description: String,
  /// Nominally `1..=10`; not validated.
  pub severity:    i64,
  pub resolved:    bool,
}

impl Entity for SafetyIncident {
  const MAP: &'static str = "incidents";
  type Key = IncidentKey;
}

/// An incident paired with its id, as listed in a driver's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
  pub incident_id: IncidentId,
  #[serde(flatten)]
  pub incident:    SafetyIncident,
}

/// Input for [`DriverRegistry::record_safety_incident`](crate::registry::DriverRegistry::record_safety_incident).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncident {
  pub description: String,
  pub severity:    i64,
  pub timestamp:   UnixTime,
}
