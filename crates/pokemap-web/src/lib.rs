//! The pokemap web site.
//!
//! Exposes an axum [`Router`] serving the overview map, the per-species detail
//! pages, the uploaded images and the JSON API, all backed by any
//! [`PokedexStore`].

pub mod error;
pub mod fixture;
pub mod map;
pub mod pages;

pub use error::Error;

use std::{path::{Path, PathBuf}, sync::Arc};

use axum::{Router, routing::get};
use pokemap_core::{image::ImageResolver, store::PokedexStore, view::ViewAssembler};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

use map::LeafletMap;
use pages::Pages;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `POKEMAP_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  /// Public origin used to build absolute image URLs.
  pub base_url:       String,
  pub store_path:     PathBuf,
  /// Directory holding uploaded species images.
  pub media_dir:      PathBuf,
  /// URL prefix `media_dir` is served under.
  pub media_url:      String,
  pub map_center_lat: f64,
  pub map_center_lon: f64,
  pub map_zoom:       u8,
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` and the environment over the
  /// built-in defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8000_i64)?
      .set_default("base_url", "http://127.0.0.1:8000")?
      .set_default("store_path", "pokemap.sqlite3")?
      .set_default("media_dir", "media")?
      .set_default("media_url", "/media/")?
      .set_default("map_center_lat", map::MOSCOW_CENTER.0)?
      .set_default("map_center_lon", map::MOSCOW_CENTER.1)?
      .set_default("map_zoom", 12_i64)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("POKEMAP"))
      .build()?
      .try_deserialize()
  }

  pub fn image_resolver(&self) -> ImageResolver {
    ImageResolver::new(self.base_url.clone(), self.media_url.clone())
  }

  pub fn leaflet_map(&self) -> LeafletMap {
    LeafletMap {
      center: (self.map_center_lat, self.map_center_lon),
      zoom: self.map_zoom,
      ..LeafletMap::default()
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: PokedexStore> {
  pub store:  Arc<S>,
  pub views:  Arc<ViewAssembler>,
  pub map:    Arc<LeafletMap>,
  pub pages:  Arc<Pages>,
  pub config: Arc<ServerConfig>,
}

impl<S: PokedexStore> AppState<S> {
  /// Wire up the view assembler, map renderer and templates for `config`.
  pub fn new(store: S, config: ServerConfig) -> Result<Self, Error> {
    Ok(Self {
      store:  Arc::new(store),
      views:  Arc::new(ViewAssembler::new(config.image_resolver())),
      map:    Arc::new(config.leaflet_map()),
      pages:  Arc::new(Pages::new()?),
      config: Arc::new(config),
    })
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the web site.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: PokedexStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let api = pokemap_api::api_router(state.store.clone(), state.views.clone());
  let media = ServeDir::new(&state.config.media_dir);
  let media_prefix = state.config.media_url.trim_matches('/').to_owned();

  let app = Router::new()
    .route("/",               get(pages::index::<S>))
    .route("/pokemon/{id}",   get(pages::pokemon::<S>))
    .route("/pokemon/{id}/",  get(pages::pokemon::<S>))
    .with_state(state)
    .nest("/api", api);

  let app = if media_prefix.is_empty() {
    app.fallback_service(media)
  } else {
    app.nest_service(&format!("/{media_prefix}"), media)
  };

  app.layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
