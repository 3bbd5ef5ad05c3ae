//! JSON REST API for pokemap.
//!
//! Exposes an axum [`Router`] backed by any [`pokemap_core::store::PokedexStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", pokemap_api::api_router(store.clone(), views.clone()))
//! ```

pub mod error;
pub mod maps;
pub mod sightings;
pub mod species;

use std::sync::Arc;

use axum::{Router, routing::get};
use pokemap_core::{store::PokedexStore, view::ViewAssembler};

pub use error::ApiError;

/// State shared by every API handler.
#[derive(Clone)]
pub struct ApiState<S: PokedexStore> {
  pub store: Arc<S>,
  pub views: Arc<ViewAssembler>,
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, views: Arc<ViewAssembler>) -> Router<()>
where
  S: PokedexStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Catalog
    .route("/species", get(species::list::<S>))
    .route("/species/{id}", get(species::get_one::<S>))
    // Sightings
    .route("/sightings/active", get(sightings::active::<S>))
    // Assembled views
    .route("/map", get(maps::listing::<S>))
    .route("/map/{id}", get(maps::detail::<S>))
    .with_state(ApiState { store, views })
}
