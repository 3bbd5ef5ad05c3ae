//! JSON fixture import.
//!
//! A fixture names species by a free-form `key` so that predecessor links and
//! sightings can refer to them before the store has assigned ids:
//!
//! ```json
//! {
//!   "species": [
//!     { "key": "bulbasaur", "title": "Бульбазавр", "image": "pokemons_image/bulbasaur.png" },
//!     { "key": "ivysaur", "title": "Ивизавр", "previous_evolution": "bulbasaur" }
//!   ],
//!   "sightings": [
//!     { "species": "ivysaur", "latitude": 55.75, "longitude": 37.62,
//!       "appeared_at": "2024-01-01T11:00:00Z", "disappeared_at": "2024-01-01T13:00:00Z",
//!       "level": 12 }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pokemap_core::{
  sighting::{BattleStats, NewSighting},
  species::{NewSpecies, SpeciesId},
  store::PokedexStore,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
  #[error("duplicate species key: {0:?}")]
  DuplicateKey(String),
  #[error("unknown species key: {0:?}")]
  UnknownKey(String),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn store_err<E>(e: E) -> FixtureError
where
  E: std::error::Error + Send + Sync + 'static,
{
  FixtureError::Store(Box::new(e))
}

#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
  #[serde(default)]
  pub species:   Vec<SpeciesRecord>,
  #[serde(default)]
  pub sightings: Vec<SightingRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SpeciesRecord {
  pub key:                String,
  pub title:              String,
  pub title_en:           Option<String>,
  pub title_jp:           Option<String>,
  pub image:              Option<String>,
  pub description:        Option<String>,
  /// Key of the species this one evolved from.
  pub previous_evolution: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SightingRecord {
  /// Key of the sighted species.
  pub species:        String,
  pub latitude:       f64,
  pub longitude:      f64,
  pub appeared_at:    DateTime<Utc>,
  pub disappeared_at: Option<DateTime<Utc>>,
  #[serde(flatten)]
  pub stats:          BattleStats,
}

/// What a [`load`] call wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
  pub species:   usize,
  pub sightings: usize,
}

/// Write every species and sighting in `fixture` to `store`.
///
/// Species are inserted first, then linked to their predecessors, so a
/// fixture may list them in any order. Keys are checked before anything is
/// written.
pub async fn load<S>(store: &S, fixture: Fixture) -> Result<LoadSummary, FixtureError>
where
  S: PokedexStore,
{
  let mut seen = std::collections::HashSet::new();
  for record in &fixture.species {
    if !seen.insert(record.key.as_str()) {
      return Err(FixtureError::DuplicateKey(record.key.clone()));
    }
  }
  let dangling = fixture
    .species
    .iter()
    .filter_map(|r| r.previous_evolution.as_ref())
    .chain(fixture.sightings.iter().map(|r| &r.species))
    .find(|key| !seen.contains(key.as_str()));
  if let Some(key) = dangling {
    return Err(FixtureError::UnknownKey(key.clone()));
  }

  let mut ids: HashMap<String, SpeciesId> = HashMap::new();
  let mut links = Vec::new();

  for record in fixture.species {
    let species = store
      .add_species(NewSpecies {
        title:              record.title,
        title_en:           record.title_en,
        title_jp:           record.title_jp,
        image:              record.image,
        description:        record.description,
        previous_evolution: None,
      })
      .await
      .map_err(store_err)?;
    if let Some(prev) = record.previous_evolution {
      links.push((species.species_id, prev));
    }
    ids.insert(record.key, species.species_id);
  }

  for (species_id, prev_key) in links {
    store
      .set_previous_evolution(species_id, Some(ids[&prev_key]))
      .await
      .map_err(store_err)?;
  }

  let mut sightings = 0;
  for record in fixture.sightings {
    store
      .record_sighting(NewSighting {
        species_id:     ids[&record.species],
        latitude:       record.latitude,
        longitude:      record.longitude,
        appeared_at:    record.appeared_at,
        disappeared_at: record.disappeared_at,
        stats:          record.stats,
      })
      .await
      .map_err(store_err)?;
    sightings += 1;
  }

  let summary = LoadSummary { species: ids.len(), sightings };
  tracing::info!(species = summary.species, sightings = summary.sightings, "fixture loaded");
  Ok(summary)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use pokemap_store_sqlite::SqliteStore;

  use super::*;

  const FIXTURE: &str = r#"{
    "species": [
      { "key": "ivysaur", "title": "Ивизавр", "previous_evolution": "bulbasaur" },
      { "key": "bulbasaur", "title": "Бульбазавр", "title_en": "Bulbasaur",
        "image": "pokemons_image/bulbasaur.png" }
    ],
    "sightings": [
      { "species": "ivysaur", "latitude": 55.75, "longitude": 37.62,
        "appeared_at": "2024-01-01T11:00:00Z", "disappeared_at": "2024-01-01T13:00:00Z",
        "level": 12, "attack": 30 },
      { "species": "bulbasaur", "latitude": 55.70, "longitude": 37.60,
        "appeared_at": "2024-01-01T10:00:00Z" }
    ]
  }"#;

  #[tokio::test]
  async fn loads_species_links_and_sightings() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let fixture: Fixture = serde_json::from_str(FIXTURE).unwrap();

    let summary = load(&store, fixture).await.unwrap();
    assert_eq!(summary, LoadSummary { species: 2, sightings: 2 });

    let catalog = store.list_species().await.unwrap();
    let ivysaur = catalog.iter().find(|s| s.title == "Ивизавр").unwrap();
    let bulbasaur = catalog.iter().find(|s| s.title == "Бульбазавр").unwrap();
    assert_eq!(ivysaur.previous_evolution, Some(bulbasaur.species_id));

    let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let active = store.active_sightings(noon, None).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].species_id, ivysaur.species_id);
    assert_eq!(active[0].stats.level, Some(12));
    assert_eq!(active[0].stats.attack, Some(30));
  }

  #[tokio::test]
  async fn unknown_key_is_rejected_before_writing() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let fixture: Fixture = serde_json::from_str(
      r#"{ "species": [ { "key": "a", "title": "A", "previous_evolution": "ghost" } ] }"#,
    )
    .unwrap();

    let err = load(&store, fixture).await.unwrap_err();
    assert!(matches!(err, FixtureError::UnknownKey(k) if k == "ghost"));
    assert!(store.list_species().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn duplicate_key_is_rejected() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let fixture: Fixture = serde_json::from_str(
      r#"{ "species": [ { "key": "a", "title": "A" }, { "key": "a", "title": "B" } ] }"#,
    )
    .unwrap();
    assert!(matches!(
      load(&store, fixture).await,
      Err(FixtureError::DuplicateKey(_))
    ));
  }

  #[tokio::test]
  async fn self_evolution_surfaces_as_store_error() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let fixture: Fixture = serde_json::from_str(
      r#"{ "species": [ { "key": "a", "title": "A", "previous_evolution": "a" } ] }"#,
    )
    .unwrap();
    assert!(matches!(
      load(&store, fixture).await,
      Err(FixtureError::Store(_))
    ));
  }
}
