//! [`SqliteStore`] — the SQLite implementation of [`PokedexStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use pokemap_core::{
  Error as CoreError,
  sighting::{NewSighting, Sighting},
  species::{NewSpecies, Species, SpeciesId},
  store::PokedexStore,
};

use crate::{
  encode::{
    RawSighting, SIGHTING_COLUMNS, SPECIES_COLUMNS, encode_dt, species_from_row,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A pokemap store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn species_exists(&self, id: SpeciesId) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM species WHERE species_id = ?1",
              rusqlite::params![id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }

  async fn require_species(&self, id: SpeciesId) -> Result<()> {
    if self.species_exists(id).await? {
      Ok(())
    } else {
      Err(CoreError::SpeciesNotFound(id).into())
    }
  }
}

// ─── PokedexStore impl ───────────────────────────────────────────────────────

impl PokedexStore for SqliteStore {
  type Error = Error;

  // ── Species catalog ───────────────────────────────────────────────────────

  async fn add_species(&self, input: NewSpecies) -> Result<Species> {
    if let Some(prev) = input.previous_evolution {
      self.require_species(prev).await?;
    }

    let row = input.clone();
    let species_id: SpeciesId = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO species (
             title, title_en, title_jp, image, description, previous_evolution_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            row.title,
            row.title_en,
            row.title_jp,
            row.image,
            row.description,
            row.previous_evolution,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(species_id, title = %input.title, "added species");

    Ok(Species {
      species_id,
      title: input.title,
      title_en: input.title_en,
      title_jp: input.title_jp,
      image: input.image,
      description: input.description,
      previous_evolution: input.previous_evolution,
    })
  }

  async fn set_previous_evolution(
    &self,
    species_id: SpeciesId,
    previous:   Option<SpeciesId>,
  ) -> Result<()> {
    if previous == Some(species_id) {
      return Err(CoreError::SelfEvolution(species_id).into());
    }
    self.require_species(species_id).await?;
    if let Some(prev) = previous {
      self.require_species(prev).await?;
    }

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE species SET previous_evolution_id = ?2 WHERE species_id = ?1",
          rusqlite::params![species_id, previous],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(species_id, ?previous, "linked previous evolution");
    Ok(())
  }

  async fn get_species(&self, id: SpeciesId) -> Result<Option<Species>> {
    let species = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM species WHERE species_id = ?1", SPECIES_COLUMNS),
              rusqlite::params![id],
              species_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(species)
  }

  async fn list_species(&self) -> Result<Vec<Species>> {
    let species = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM species ORDER BY species_id",
          SPECIES_COLUMNS
        ))?;
        let rows = stmt
          .query_map([], species_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(species)
  }

  async fn next_evolution(&self, id: SpeciesId) -> Result<Option<Species>> {
    let species = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {} FROM species
                 WHERE previous_evolution_id = ?1
                 ORDER BY species_id
                 LIMIT 1",
                SPECIES_COLUMNS
              ),
              rusqlite::params![id],
              species_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(species)
  }

  async fn delete_species(&self, id: SpeciesId) -> Result<bool> {
    // Sightings go with the species (ON DELETE CASCADE); successors keep
    // existing with a cleared link (ON DELETE SET NULL).
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM species WHERE species_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if deleted > 0 {
      tracing::debug!(species_id = id, "deleted species");
    }
    Ok(deleted > 0)
  }

  // ── Sightings ─────────────────────────────────────────────────────────────

  async fn record_sighting(&self, input: NewSighting) -> Result<Sighting> {
    input.validate()?;
    self.require_species(input.species_id).await?;

    let species_id         = input.species_id;
    let latitude           = input.latitude;
    let longitude          = input.longitude;
    let appeared_at_str    = encode_dt(input.appeared_at);
    let disappeared_at_str = input.disappeared_at.map(encode_dt);
    let stats              = input.stats;

    let sighting_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sightings (
             species_id, latitude, longitude, appeared_at, disappeared_at,
             level, health, attack, defense, stamina
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            species_id,
            latitude,
            longitude,
            appeared_at_str,
            disappeared_at_str,
            stats.level,
            stats.health,
            stats.attack,
            stats.defense,
            stats.stamina,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(sighting_id, species_id, "recorded sighting");

    Ok(Sighting {
      sighting_id,
      species_id,
      latitude,
      longitude,
      appeared_at: input.appeared_at,
      disappeared_at: input.disappeared_at,
      stats,
    })
  }

  async fn active_sightings(
    &self,
    at:      DateTime<Utc>,
    species: Option<SpeciesId>,
  ) -> Result<Vec<Sighting>> {
    if let Some(id) = species {
      self.require_species(id).await?;
    }

    let at_str = encode_dt(at);

    // `disappeared_at >= ?1` is never true for NULL, which keeps open-ended
    // sightings off the map.
    let raws: Vec<RawSighting> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM sightings
           WHERE appeared_at <= ?1
             AND disappeared_at >= ?1
             AND (?2 IS NULL OR species_id = ?2)
           ORDER BY sighting_id",
          SIGHTING_COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![at_str, species], RawSighting::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSighting::into_sighting).collect()
  }
}
