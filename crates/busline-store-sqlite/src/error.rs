//! Error type for `busline-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// SQLite integers are signed; counters above `i64::MAX` cannot be stored.
  #[error("counter {name} out of range: {value}")]
  CounterOutOfRange { name: String, value: i128 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
