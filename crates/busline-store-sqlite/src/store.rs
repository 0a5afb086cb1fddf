//! [`SqliteStore`] — the SQLite implementation of [`KeyedStore`].

use std::path::Path;

use busline_core::store::{KeyedStore, StoreKey};
use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use serde_json::Value;

use crate::{
  Result,
  encode::{decode_counter, decode_dt, decode_value, encode_counter, encode_dt, encode_value},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A keyed store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// When the entry at `key` was last written, if it exists.
  pub async fn updated_at(&self, key: StoreKey) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT updated_at FROM entries WHERE map = ?1 AND key_json = ?2",
              rusqlite::params![key.map, key.key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.as_deref().map(decode_dt).transpose()
  }
}

// ─── KeyedStore impl ─────────────────────────────────────────────────────────

impl KeyedStore for SqliteStore {
  type Error = crate::Error;

  async fn get(&self, key: StoreKey) -> Result<Option<Value>> {
    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value_json FROM entries WHERE map = ?1 AND key_json = ?2",
              rusqlite::params![key.map, key.key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.as_deref().map(decode_value).transpose()
  }

  async fn set(&self, key: StoreKey, value: Value) -> Result<()> {
    let value_str = encode_value(&value);
    let at_str    = encode_dt(Utc::now());

    tracing::trace!(%key, "sqlite upsert");
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO entries (map, key_json, value_json, updated_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (map, key_json) DO UPDATE SET
             value_json = excluded.value_json,
             updated_at = excluded.updated_at",
          rusqlite::params![key.map, key.key, value_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn read_counter(&self, name: &'static str) -> Result<Option<u64>> {
    let raw: Option<i64> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM counters WHERE name = ?1",
              rusqlite::params![name],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(|v| decode_counter(name, v)).transpose()
  }

  async fn write_counter(&self, name: &'static str, value: u64) -> Result<()> {
    let value = encode_counter(name, value)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO counters (name, value) VALUES (?1, ?2)
           ON CONFLICT (name) DO UPDATE SET value = excluded.value",
          rusqlite::params![name, value],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
