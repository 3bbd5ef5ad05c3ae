//! HTML pages: the overview map and the per-species detail page.
//!
//! Templates are compiled into the binary and rendered with handlebars. The
//! map fragment is inserted unescaped; everything else goes through the
//! default HTML escaping.

use axum::{
  extract::{Path, Query, State},
  response::Html,
};
use chrono::Utc;
use handlebars::Handlebars;
use pokemap_api::maps::AtParams;
use pokemap_core::{
  species::SpeciesId,
  store::PokedexStore,
  view::{DetailView, ListingView},
};
use serde_json::json;

use crate::{AppState, error::Error};

const MAINPAGE: &str = "mainpage";
const POKEMON: &str = "pokemon";

// ─── Templates ───────────────────────────────────────────────────────────────

/// The compiled page templates.
pub struct Pages {
  registry: Handlebars<'static>,
}

impl Pages {
  pub fn new() -> Result<Self, Error> {
    let mut registry = Handlebars::new();
    registry.register_template_string(MAINPAGE, include_str!("../templates/mainpage.hbs"))?;
    registry.register_template_string(POKEMON, include_str!("../templates/pokemon.hbs"))?;
    Ok(Self { registry })
  }

  pub fn mainpage(&self, map: &str, view: &ListingView) -> Result<String, Error> {
    Ok(self.registry.render(
      MAINPAGE,
      &json!({ "map": map, "pokemons": view.cards }),
    )?)
  }

  pub fn pokemon(&self, map: &str, view: &DetailView) -> Result<String, Error> {
    Ok(self.registry.render(
      POKEMON,
      &json!({ "map": map, "pokemon": view.species }),
    )?)
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `GET /[?at=...]` — every active sighting plus the species catalog.
pub async fn index<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<AtParams>,
) -> Result<Html<String>, Error>
where
  S: PokedexStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let now = params.at.unwrap_or_else(Utc::now);
  let view = state
    .views
    .listing(state.store.as_ref(), now)
    .await
    .map_err(Error::store)?;

  let map = state.map.render(&view.markers)?;
  Ok(Html(state.pages.mainpage(&map, &view)?))
}

/// `GET /pokemon/:id/[?at=...]` — one species, its active sightings and its
/// evolution links.
pub async fn pokemon<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<SpeciesId>,
  Query(params): Query<AtParams>,
) -> Result<Html<String>, Error>
where
  S: PokedexStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let now = params.at.unwrap_or_else(Utc::now);
  let view = state
    .views
    .detail(state.store.as_ref(), now, id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;

  let map = state.map.render(&view.markers)?;
  Ok(Html(state.pages.pokemon(&map, &view)?))
}
