//! Error types for `busline-core`.

use thiserror::Error;

use crate::{driver::DriverId, incident::IncidentId};

/// Wire code for "referenced entity not found".
pub const CODE_NOT_FOUND: u32 = 1;

/// Wire code for any storage or encoding failure.
pub const CODE_STORAGE: u32 = 2;

#[derive(Debug, Error)]
pub enum Error {
  #[error("driver not found: {0}")]
  DriverNotFound(DriverId),

  #[error("incident not found: {0}")]
  IncidentNotFound(IncidentId),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::DriverNotFound(_) | Self::IncidentNotFound(_))
  }

  /// The numeric discriminant reported to callers.
  pub fn code(&self) -> u32 {
    if self.is_not_found() { CODE_NOT_FOUND } else { CODE_STORAGE }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
