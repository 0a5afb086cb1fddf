//! The `KeyedStore` trait and the key types it is addressed with.
//!
//! The trait is implemented by storage backends (e.g. `busline-store-sqlite`,
//! or [`MemoryStore`](crate::memory::MemoryStore) for tests). It knows nothing
//! about drivers: it stores opaque JSON values under named maps and hands out
//! named counters, so other modules sharing the platform can use it as-is.

use std::{fmt, future::Future};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::Result;

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Counter backing driver id allocation.
pub const DRIVER_COUNTER: &str = "next-driver-id";

/// Counter backing incident id allocation.
pub const INCIDENT_COUNTER: &str = "next-incident-id";

/// Value an absent counter is read as.
pub const FIRST_ID: u64 = 1;

/// A map name plus a composite key, encoded as canonical JSON.
///
/// `serde_json` without `preserve_order` emits object fields sorted, so two
/// keys built from the same named fields always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreKey {
  pub map: &'static str,
  pub key: String,
}

impl StoreKey {
  pub fn new<K: Serialize>(map: &'static str, key: &K) -> Result<Self> {
    let value = serde_json::to_value(key)?;
    Ok(Self { map, key: value.to_string() })
  }
}

impl fmt::Display for StoreKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.map, self.key)
  }
}

/// A record type that lives in one named map of a [`KeyedStore`].
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
  const MAP: &'static str;
  type Key: Serialize + Send + Sync;

  fn store_key(key: &Self::Key) -> Result<StoreKey> { StoreKey::new(Self::MAP, key) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the platform's persistent associative store.
///
/// Each call is atomic on its own; nothing spans calls. Callers that need
/// multi-key consistency serialise themselves (see
/// [`DriverRegistry`](crate::registry::DriverRegistry)).
pub trait KeyedStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the value at `key`. Returns `None` if nothing is stored there.
  fn get(
    &self,
    key: StoreKey,
  ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send + '_;

  /// Upsert: fully replace whatever is stored at `key`.
  fn set(
    &self,
    key: StoreKey,
    value: Value,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Read a named counter. Returns `None` if it has never been written.
  fn read_counter(
    &self,
    name: &'static str,
  ) -> impl Future<Output = Result<Option<u64>, Self::Error>> + Send + '_;

  /// Overwrite a named counter.
  fn write_counter(
    &self,
    name: &'static str,
    value: u64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
