//! JSON REST API for the Busline driver registry.
//!
//! Exposes an axum [`Router`] backed by a [`DriverRegistry`] over any
//! [`KeyedStore`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", busline_api::api_router(registry.clone()))
//! ```

pub mod drivers;
pub mod error;
pub mod incidents;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use busline_core::{registry::DriverRegistry, store::KeyedStore};

pub use error::ApiError;

/// Shared handler state.
pub type Registry<S> = Arc<DriverRegistry<S>>;

/// Build a fully-materialised API router for `registry`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(registry: Registry<S>) -> Router<()>
where
  S: KeyedStore + 'static,
{
  Router::new()
    // Drivers
    .route("/drivers", post(drivers::register::<S>))
    .route("/drivers/{id}", get(drivers::get_one::<S>))
    .route("/drivers/{id}/license", put(drivers::update_license::<S>))
    .route("/drivers/{id}/active", put(drivers::set_active::<S>))
    .route("/drivers/{id}/eligibility", get(drivers::eligibility::<S>))
    // Incidents
    .route(
      "/drivers/{id}/incidents",
      post(incidents::record::<S>).get(incidents::history::<S>),
    )
    .route("/incidents/{id}", get(incidents::get_one::<S>))
    .with_state(registry)
}
