//! SQL schema for the Busline SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per (map, composite key). Values are replaced wholesale on write.
CREATE TABLE IF NOT EXISTS entries (
    map         TEXT NOT NULL,   -- e.g. 'drivers', 'incidents'
    key_json    TEXT NOT NULL,   -- canonical JSON of the key fields
    value_json  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,   -- ISO 8601 UTC
    PRIMARY KEY (map, key_json)
);

CREATE TABLE IF NOT EXISTS counters (
    name   TEXT PRIMARY KEY,
    value  INTEGER NOT NULL CHECK (value >= 0)
);

PRAGMA user_version = 1;
";
