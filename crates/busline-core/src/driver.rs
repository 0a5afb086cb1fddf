//! Driver records — credentials, status and the running safety score.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{UnixTime, store::Entity};

/// Score every driver starts with.
pub const INITIAL_SAFETY_SCORE: u8 = 100;

/// Identifier allocated from the `next-driver-id` counter.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DriverId(pub u64);

impl fmt::Display for DriverId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// Composite store key for the `drivers` map: `{"driver_id": n}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DriverKey {
  pub driver_id: DriverId,
}

/// A stored driver record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
  pub name:                  String,
  pub license_number:        String,
  pub license_expiry:        UnixTime,
  /// Free-form tags such as "CDL Class B"; order is preserved.
  pub qualifications:        Vec<String>,
  pub active:                bool,
  /// Always within `0..=100`.
  pub safety_score:          u8,
  pub last_background_check: UnixTime,
}

impl Entity for Driver {
  const MAP: &'static str = "drivers";
  type Key = DriverKey;
}

/// Input for [`DriverRegistry::register_driver`](crate::registry::DriverRegistry::register_driver).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDriver {
  pub name:                  String,
  pub license_number:        String,
  pub license_expiry:        UnixTime,
  #[serde(default)]
  pub qualifications:        Vec<String>,
  pub last_background_check: UnixTime,
}

impl NewDriver {
  /// Build the record a fresh registration stores: active, full score.
  pub fn into_driver(self) -> Driver {
    Driver {
      name:                  self.name,
      license_number:        self.license_number,
      license_expiry:        self.license_expiry,
      qualifications:        self.qualifications,
      active:                true,
      safety_score:          INITIAL_SAFETY_SCORE,
      last_background_check: self.last_background_check,
    }
  }
}
