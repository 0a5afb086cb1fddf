//! Core types and trait definitions for the Busline driver registry.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::KeyedStore`]; the API and server crates drive a
//! [`registry::DriverRegistry`] over whichever backend they are handed.

pub mod driver;
pub mod eligibility;
pub mod error;
pub mod incident;
pub mod memory;
pub mod penalty;
pub mod registry;
pub mod store;

pub use error::{Error, Result};

/// Seconds since the Unix epoch, as carried on every record.
pub type UnixTime = i64;
