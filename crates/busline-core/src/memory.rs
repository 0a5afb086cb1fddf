//! [`MemoryStore`] — an in-process [`KeyedStore`] that journals every write.
//!
//! Used as the test double for the registry: tests seed it directly, run an
//! operation, then inspect [`MemoryStore::mutations`] or compare
//! [`Snapshot`]s to prove that a failed call wrote nothing.

use std::{collections::BTreeMap, convert::Infallible, sync::Arc};

use serde_json::Value;
use tokio::sync::Mutex;

use crate::store::{KeyedStore, StoreKey};

/// One observed write.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
  Set { key: StoreKey, value: Value },
  Counter { name: &'static str, value: u64 },
}

/// Full copy of the store contents at a point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
  pub entries:  BTreeMap<StoreKey, Value>,
  pub counters: BTreeMap<&'static str, u64>,
}

#[derive(Default)]
struct Inner {
  state:   Snapshot,
  journal: Vec<Mutation>,
}

/// Cloning is cheap; clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Every write since creation (or the last [`clear_journal`](Self::clear_journal)).
  pub async fn mutations(&self) -> Vec<Mutation> {
    self.inner.lock().await.journal.clone()
  }

  /// Forget recorded writes, keeping the data. Handy after seeding.
  pub async fn clear_journal(&self) { self.inner.lock().await.journal.clear(); }

  pub async fn snapshot(&self) -> Snapshot { self.inner.lock().await.state.clone() }
}

impl KeyedStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, key: StoreKey) -> Result<Option<Value>, Infallible> {
    Ok(self.inner.lock().await.state.entries.get(&key).cloned())
  }

  async fn set(&self, key: StoreKey, value: Value) -> Result<(), Infallible> {
    let mut inner = self.inner.lock().await;
    inner.journal.push(Mutation::Set { key: key.clone(), value: value.clone() });
    inner.state.entries.insert(key, value);
    Ok(())
  }

  async fn read_counter(&self, name: &'static str) -> Result<Option<u64>, Infallible> {
    Ok(self.inner.lock().await.state.counters.get(name).copied())
  }

  async fn write_counter(&self, name: &'static str, value: u64) -> Result<(), Infallible> {
    let mut inner = self.inner.lock().await;
    inner.journal.push(Mutation::Counter { name, value });
    inner.state.counters.insert(name, value);
    Ok(())
  }
}
