//! Handlers for `/species` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/species` | Whole catalog in id order |
//! | `GET`  | `/species/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
};
use pokemap_core::{
  species::{Species, SpeciesId},
  store::PokedexStore,
};

use crate::{ApiState, error::ApiError};

/// `GET /species`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Species>>, ApiError>
where
  S: PokedexStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let species = state.store.list_species().await.map_err(ApiError::store)?;
  Ok(Json(species))
}

/// `GET /species/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<SpeciesId>,
) -> Result<Json<Species>, ApiError>
where
  S: PokedexStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let species = state
    .store
    .get_species(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("species {id} not found")))?;
  Ok(Json(species))
}
