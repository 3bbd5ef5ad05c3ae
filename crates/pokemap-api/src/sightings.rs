//! Handler for `GET /sightings/active`.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, Utc};
use pokemap_core::{
  sighting::Sighting,
  species::SpeciesId,
  store::PokedexStore,
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ActiveParams {
  /// Reference instant. Defaults to now.
  pub at:         Option<DateTime<Utc>>,
  /// Restrict to one species; 404 if it does not exist.
  pub species_id: Option<SpeciesId>,
}

/// `GET /sightings/active[?at=...][&species_id=...]`
pub async fn active<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ActiveParams>,
) -> Result<Json<Vec<Sighting>>, ApiError>
where
  S: PokedexStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if let Some(id) = params.species_id {
    state
      .store
      .get_species(id)
      .await
      .map_err(ApiError::store)?
      .ok_or_else(|| ApiError::NotFound(format!("species {id} not found")))?;
  }

  let at = params.at.unwrap_or_else(Utc::now);
  let sightings = state
    .store
    .active_sightings(at, params.species_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(sightings))
}
