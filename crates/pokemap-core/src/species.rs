//! Species — catalog entries describing a kind of Pokémon.
//!
//! Species are reference data. The view layer only ever reads them; they are
//! written by the fixture loader or directly through the store.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a [`Species`].
pub type SpeciesId = i64;

/// A kind of Pokémon, as opposed to one particular sighting of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
  pub species_id:         SpeciesId,
  /// Primary display name.
  pub title:              String,
  pub title_en:           Option<String>,
  pub title_jp:           Option<String>,
  /// Path of the image file, relative to the media root.
  pub image:              Option<String>,
  pub description:        Option<String>,
  /// The species this one evolved from. Never equal to `species_id`.
  pub previous_evolution: Option<SpeciesId>,
}

/// Input to [`crate::store::PokedexStore::add_species`].
/// `species_id` is always assigned by the store.
#[derive(Debug, Clone, Default)]
pub struct NewSpecies {
  pub title:              String,
  pub title_en:           Option<String>,
  pub title_jp:           Option<String>,
  pub image:              Option<String>,
  pub description:        Option<String>,
  pub previous_evolution: Option<SpeciesId>,
}

impl NewSpecies {
  /// Convenience constructor with all optional fields left empty.
  pub fn new(title: impl Into<String>) -> Self {
    Self { title: title.into(), ..Self::default() }
  }
}
