//! [`DriverRegistry`] — driver lifecycle, incidents and eligibility over any
//! [`KeyedStore`].
//!
//! Every mutating operation looks up what it needs before writing anything,
//! so a `NotFound` failure leaves the store untouched.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{
  Error, Result, UnixTime,
  driver::{Driver, DriverId, DriverKey, NewDriver},
  eligibility::{Eligibility, EligibilityPolicy},
  incident::{IncidentId, IncidentKey, IncidentRecord, NewIncident, SafetyIncident},
  penalty::PenaltySchedule,
  store::{DRIVER_COUNTER, Entity, FIRST_ID, INCIDENT_COUNTER, KeyedStore},
};

/// Tunable thresholds. The default is the production rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryPolicy {
  pub penalties:   PenaltySchedule,
  pub eligibility: EligibilityPolicy,
}

/// A driver together with every incident recorded against it, read under one
/// consistent view of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverHistory {
  pub driver:           Driver,
  pub incidents:        Vec<IncidentRecord>,
  /// Value of the incident counter at read time.
  pub next_incident_id: IncidentId,
}

/// The driver registry.
///
/// Writers are serialised through an internal gate and hold it for the whole
/// operation; readers share it. A reader therefore never sees an incident
/// without the matching score change, even though the store itself only
/// guarantees per-key atomicity.
pub struct DriverRegistry<S> {
  store:  S,
  policy: RegistryPolicy,
  gate:   RwLock<()>,
}

impl<S: KeyedStore> DriverRegistry<S> {
  pub fn new(store: S) -> Self { Self::with_policy(store, RegistryPolicy::default()) }

  pub fn with_policy(store: S, policy: RegistryPolicy) -> Self {
    Self { store, policy, gate: RwLock::new(()) }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn policy(&self) -> &RegistryPolicy { &self.policy }

  // ── Store helpers ─────────────────────────────────────────────────────────

  async fn load<E: Entity>(&self, key: &E::Key) -> Result<Option<E>> {
    let key = E::store_key(key)?;
    let value = self.store.get(key).await.map_err(Error::store)?;
    Ok(value.map(serde_json::from_value).transpose()?)
  }

  async fn save<E: Entity>(&self, key: &E::Key, record: &E) -> Result<()> {
    let key = E::store_key(key)?;
    let value = serde_json::to_value(record)?;
    self.store.set(key, value).await.map_err(Error::store)
  }

  async fn next_id(&self, counter: &'static str) -> Result<u64> {
    let current = self.store.read_counter(counter).await.map_err(Error::store)?;
    Ok(current.unwrap_or(FIRST_ID))
  }

  async fn advance(&self, counter: &'static str, id: u64) -> Result<()> {
    self
      .store
      .write_counter(counter, id + 1)
      .await
      .map_err(Error::store)
  }

  /// First id at or after the incident counter whose slot is empty.
  ///
  /// A write that failed part-way can leave an incident stored without the
  /// counter having moved past it; that slot is never handed out again.
  async fn allocate_incident_id(&self) -> Result<IncidentId> {
    let mut id = self.next_id(INCIDENT_COUNTER).await?;
    loop {
      let key = SafetyIncident::store_key(&IncidentKey { incident_id: IncidentId(id) })?;
      if self.store.get(key).await.map_err(Error::store)?.is_none() {
        return Ok(IncidentId(id));
      }
      tracing::warn!(incident_id = id, "skipping occupied incident slot");
      id += 1;
    }
  }

  async fn require_driver(&self, driver_id: DriverId) -> Result<Driver> {
    match self.load::<Driver>(&DriverKey { driver_id }).await? {
      Some(driver) => Ok(driver),
      None => {
        tracing::warn!(%driver_id, "driver not found");
        Err(Error::DriverNotFound(driver_id))
      }
    }
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Store a new driver (active, score 100) under the next id.
  pub async fn register_driver(&self, input: NewDriver) -> Result<DriverId> {
    let _guard = self.gate.write().await;

    let driver_id = DriverId(self.next_id(DRIVER_COUNTER).await?);
    let driver = input.into_driver();
    self.save(&DriverKey { driver_id }, &driver).await?;
    self.advance(DRIVER_COUNTER, driver_id.0).await?;

    tracing::info!(%driver_id, name = %driver.name, "registered driver");
    Ok(driver_id)
  }

  /// Replace the license number and expiry, keeping every other field.
  pub async fn update_driver_license(
    &self,
    driver_id: DriverId,
    license_number: String,
    license_expiry: UnixTime,
  ) -> Result<bool> {
    let _guard = self.gate.write().await;

    let existing = self.require_driver(driver_id).await?;
    let updated = Driver { license_number, license_expiry, ..existing };
    self.save(&DriverKey { driver_id }, &updated).await?;

    tracing::info!(%driver_id, license_expiry, "updated driver license");
    Ok(true)
  }

  /// Flip the `active` flag, keeping every other field.
  pub async fn set_driver_active(&self, driver_id: DriverId, active: bool) -> Result<bool> {
    let _guard = self.gate.write().await;

    let existing = self.require_driver(driver_id).await?;
    let updated = Driver { active, ..existing };
    self.save(&DriverKey { driver_id }, &updated).await?;

    tracing::info!(%driver_id, active, "set driver status");
    Ok(true)
  }

  /// Record an incident and deduct its penalty from the driver's score.
  pub async fn record_safety_incident(
    &self,
    driver_id: DriverId,
    input: NewIncident,
  ) -> Result<IncidentId> {
    let _guard = self.gate.write().await;

    let driver = self.require_driver(driver_id).await?;
    let incident_id = self.allocate_incident_id().await?;

    let incident = SafetyIncident {
      driver_id,
      timestamp: input.timestamp,
      description: input.description,
      severity: input.severity,
      resolved: false,
    };
    self.save(&IncidentKey { incident_id }, &incident).await?;

    let safety_score = self.policy.penalties.apply(driver.safety_score, incident.severity);
    let previous = driver.safety_score;
    self
      .save(&DriverKey { driver_id }, &Driver { safety_score, ..driver })
      .await?;

    self.advance(INCIDENT_COUNTER, incident_id.0).await?;

    tracing::info!(
      %driver_id,
      %incident_id,
      severity = incident.severity,
      previous,
      safety_score,
      "recorded safety incident"
    );
    Ok(incident_id)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub async fn get_driver(&self, driver_id: DriverId) -> Result<Option<Driver>> {
    let _guard = self.gate.read().await;
    self.load(&DriverKey { driver_id }).await
  }

  pub async fn get_incident(&self, incident_id: IncidentId) -> Result<Option<SafetyIncident>> {
    let _guard = self.gate.read().await;
    self.load(&IncidentKey { incident_id }).await
  }

  /// The driver and its incidents, in id order.
  ///
  /// Scans every allocated incident id, so cost grows with the total number
  /// of incidents in the store.
  pub async fn driver_history(&self, driver_id: DriverId) -> Result<DriverHistory> {
    let _guard = self.gate.read().await;

    let driver = self.require_driver(driver_id).await?;
    let next = self.next_id(INCIDENT_COUNTER).await?;

    let mut incidents = Vec::new();
    for id in FIRST_ID..next {
      let incident_id = IncidentId(id);
      if let Some(incident) = self.load::<SafetyIncident>(&IncidentKey { incident_id }).await?
        && incident.driver_id == driver_id
      {
        incidents.push(IncidentRecord { incident_id, incident });
      }
    }

    tracing::debug!(%driver_id, count = incidents.len(), "read driver history");
    Ok(DriverHistory { driver, incidents, next_incident_id: IncidentId(next) })
  }

  /// The four eligibility predicates for `driver_id` at `current_time`.
  pub async fn driver_eligibility(
    &self,
    driver_id: DriverId,
    current_time: UnixTime,
  ) -> Result<Eligibility> {
    let _guard = self.gate.read().await;

    let driver = self.require_driver(driver_id).await?;
    let eligibility = Eligibility::evaluate(&driver, current_time, &self.policy.eligibility);

    tracing::debug!(%driver_id, current_time, ?eligibility, "evaluated eligibility");
    Ok(eligibility)
  }

  /// Whether `driver_id` may drive at `current_time`.
  pub async fn check_driver_eligibility(
    &self,
    driver_id: DriverId,
    current_time: UnixTime,
  ) -> Result<bool> {
    Ok(self.driver_eligibility(driver_id, current_time).await?.is_eligible())
  }
}
