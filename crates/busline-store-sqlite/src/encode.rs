//! Encoding and decoding helpers between store values and SQLite columns.
//!
//! Values are stored as compact JSON text, timestamps as RFC 3339 strings and
//! counters as signed 64-bit integers.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{Error, Result};

// ─── JSON values ─────────────────────────────────────────────────────────────

pub fn encode_value(v: &Value) -> String { v.to_string() }

pub fn decode_value(s: &str) -> Result<Value> { Ok(serde_json::from_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Counters ────────────────────────────────────────────────────────────────

pub fn encode_counter(name: &str, value: u64) -> Result<i64> {
  i64::try_from(value).map_err(|_| Error::CounterOutOfRange {
    name:  name.to_owned(),
    value: value.into(),
  })
}

pub fn decode_counter(name: &str, value: i64) -> Result<u64> {
  u64::try_from(value).map_err(|_| Error::CounterOutOfRange {
    name:  name.to_owned(),
    value: value.into(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counter_bounds() {
    assert_eq!(encode_counter("c", 7).unwrap(), 7);
    assert!(encode_counter("c", u64::MAX).is_err());
    assert_eq!(decode_counter("c", 7).unwrap(), 7);
    assert!(decode_counter("c", -1).is_err());
  }

  #[test]
  fn dt_roundtrip() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
    assert!(decode_dt("yesterday").is_err());
  }
}
