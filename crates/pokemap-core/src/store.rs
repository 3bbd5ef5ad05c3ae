//! The `PokedexStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `pokemap-store-sqlite`).
//! Higher layers (`pokemap-api`, `pokemap-web`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  sighting::{NewSighting, Sighting},
  species::{NewSpecies, Species, SpeciesId},
};

/// Abstraction over the species catalog and the sighting store.
///
/// Referential integrity is the backend's job: deleting a species removes its
/// sightings and clears any `previous_evolution` link pointing at it.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PokedexStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Species catalog ───────────────────────────────────────────────────

  /// Persist a new species and return it with its assigned id.
  ///
  /// Returns an error if `previous_evolution` names a species that does not
  /// exist.
  fn add_species(
    &self,
    input: NewSpecies,
  ) -> impl Future<Output = Result<Species, Self::Error>> + Send + '_;

  /// Point `species_id` at a new predecessor, or clear the link with `None`.
  ///
  /// Returns an error if either species is missing or if the two ids are
  /// equal.
  fn set_previous_evolution(
    &self,
    species_id: SpeciesId,
    previous: Option<SpeciesId>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Retrieve a species by id. Returns `None` if not found.
  fn get_species(
    &self,
    id: SpeciesId,
  ) -> impl Future<Output = Result<Option<Species>, Self::Error>> + Send + '_;

  /// List the whole catalog in id order.
  fn list_species(
    &self,
  ) -> impl Future<Output = Result<Vec<Species>, Self::Error>> + Send + '_;

  /// The species that evolved from `id`. When several do, the one with the
  /// lowest id wins.
  fn next_evolution(
    &self,
    id: SpeciesId,
  ) -> impl Future<Output = Result<Option<Species>, Self::Error>> + Send + '_;

  /// Delete a species together with its sightings. Returns `false` if there
  /// was nothing to delete.
  fn delete_species(
    &self,
    id: SpeciesId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Sightings ─────────────────────────────────────────────────────────

  /// Record a sighting. The window is validated before anything is written.
  fn record_sighting(
    &self,
    input: NewSighting,
  ) -> impl Future<Output = Result<Sighting, Self::Error>> + Send + '_;

  /// Every sighting whose closed window contains `at`, optionally restricted
  /// to one species. Agrees with [`Sighting::is_visible_at`]: sightings
  /// without a disappearance time are never returned.
  fn active_sightings(
    &self,
    at: DateTime<Utc>,
    species: Option<SpeciesId>,
  ) -> impl Future<Output = Result<Vec<Sighting>, Self::Error>> + Send + '_;
}
