//! Handlers for the assembled map views.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/map` | [`ListingView`]; optional `?at=` |
//! | `GET`  | `/map/:id` | [`DetailView`]; optional `?at=`; 404 if the species is unknown |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use pokemap_core::{
  species::SpeciesId,
  store::PokedexStore,
  view::{DetailView, ListingView},
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct AtParams {
  /// Reference instant. Defaults to now.
  pub at: Option<DateTime<Utc>>,
}

/// `GET /map[?at=...]`
pub async fn listing<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<AtParams>,
) -> Result<Json<ListingView>, ApiError>
where
  S: PokedexStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let now = params.at.unwrap_or_else(Utc::now);
  let view = state
    .views
    .listing(state.store.as_ref(), now)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(view))
}

/// `GET /map/:id[?at=...]`
pub async fn detail<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<SpeciesId>,
  Query(params): Query<AtParams>,
) -> Result<Json<DetailView>, ApiError>
where
  S: PokedexStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let now = params.at.unwrap_or_else(Utc::now);
  let view = state
    .views
    .detail(state.store.as_ref(), now, id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("species {id} not found")))?;
  Ok(Json(view))
}
