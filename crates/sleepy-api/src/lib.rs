//! JSON REST API for the Sleepy inventory.
//!
//! Exposes an axum [`Router`] backed by any [`sleepy_core::store::InventoryStore`].
//! Transport concerns (binding, tracing layers) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api/v1", sleepy_api::api_router(store.clone()))
//! ```

mod body;
pub mod checkouts;
pub mod error;
pub mod items;
pub mod people;
pub mod views;

use std::sync::Arc;

use axum::{Router, routing::get};
use sleepy_core::store::InventoryStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// Collection routes answer with and without the trailing slash.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: InventoryStore + 'static,
{
  Router::new()
    // Items
    .route("/items", get(items::list::<S>).post(items::create::<S>))
    .route("/items/", get(items::list::<S>).post(items::create::<S>))
    .route(
      "/items/{id}",
      get(items::get_one::<S>)
        .put(items::update::<S>)
        .delete(items::delete::<S>),
    )
    // People
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route("/people/", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>).delete(people::delete::<S>),
    )
    // Recent checkouts
    .route("/recentcheckouts", get(checkouts::recent::<S>))
    .route("/recentcheckouts/", get(checkouts::recent::<S>))
    .with_state(store)
}
