//! The view assembler — turns catalog rows and active sightings into the
//! presentation models behind the map overview and the species detail page.
//!
//! Views are computed on read and never stored.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  image::ImageResolver,
  sighting::Sighting,
  species::{Species, SpeciesId},
  store::PokedexStore,
};

// ─── Presentation models ─────────────────────────────────────────────────────

/// One pin on the map: where a species was seen and which icon to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
  pub species_id:     SpeciesId,
  pub latitude:       f64,
  pub longitude:      f64,
  pub icon_image_url: String,
}

/// Summary card shown under the overview map, one per catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCard {
  pub species_id:     SpeciesId,
  pub icon_image_url: String,
  pub display_title:  String,
}

/// The map overview: every active sighting plus the whole catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingView {
  /// The reference instant the markers were computed for.
  pub as_of:   DateTime<Utc>,
  pub markers: Vec<MapMarker>,
  pub cards:   Vec<SpeciesCard>,
}

/// Position and level of one active sighting on the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityPosition {
  pub level:     Option<i32>,
  pub latitude:  f64,
  pub longitude: f64,
}

/// A link to a neighbouring species in the evolution chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionLink {
  pub species_id:     SpeciesId,
  pub display_title:  String,
  pub icon_image_url: String,
}

/// Everything the detail page shows about one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDetail {
  pub species_id:         SpeciesId,
  pub title:              String,
  pub title_en:           Option<String>,
  pub title_jp:           Option<String>,
  pub description:        Option<String>,
  pub icon_image_url:     String,
  pub entities:           Vec<EntityPosition>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub previous_evolution: Option<EvolutionLink>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub next_evolution:     Option<EvolutionLink>,
}

/// The detail page: one species and the markers of its active sightings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailView {
  pub as_of:   DateTime<Utc>,
  pub markers: Vec<MapMarker>,
  pub species: SpeciesDetail,
}

// ─── Assembler ───────────────────────────────────────────────────────────────

/// Builds [`ListingView`]s and [`DetailView`]s from any [`PokedexStore`].
///
/// Holds no state besides its image configuration, so one instance can be
/// shared by every request.
#[derive(Debug, Clone)]
pub struct ViewAssembler {
  images: ImageResolver,
}

impl ViewAssembler {
  pub fn new(images: ImageResolver) -> Self { Self { images } }

  fn icon(&self, species: &Species) -> String {
    self.images.resolve(species.image.as_deref())
  }

  fn link(&self, species: &Species) -> EvolutionLink {
    EvolutionLink {
      species_id:     species.species_id,
      display_title:  species.title.clone(),
      icon_image_url: self.icon(species),
    }
  }

  fn marker(sighting: &Sighting, icon_image_url: String) -> MapMarker {
    MapMarker {
      species_id: sighting.species_id,
      latitude: sighting.latitude,
      longitude: sighting.longitude,
      icon_image_url,
    }
  }

  /// Assemble the overview map at `now`.
  pub async fn listing<S>(
    &self,
    store: &S,
    now: DateTime<Utc>,
  ) -> Result<ListingView, S::Error>
  where
    S: PokedexStore,
  {
    let catalog = store.list_species().await?;
    let active = store.active_sightings(now, None).await?;

    let icons: HashMap<SpeciesId, String> = catalog
      .iter()
      .map(|s| (s.species_id, self.icon(s)))
      .collect();

    let markers = active
      .iter()
      .map(|sighting| {
        let icon = icons
          .get(&sighting.species_id)
          .cloned()
          .unwrap_or_else(|| self.images.resolve(None));
        Self::marker(sighting, icon)
      })
      .collect::<Vec<_>>();

    let cards = catalog
      .iter()
      .map(|s| SpeciesCard {
        species_id:     s.species_id,
        icon_image_url: icons[&s.species_id].clone(),
        display_title:  s.title.clone(),
      })
      .collect::<Vec<_>>();

    tracing::debug!(
      markers = markers.len(),
      cards = cards.len(),
      %now,
      "assembled listing view"
    );

    Ok(ListingView { as_of: now, markers, cards })
  }

  /// Assemble the detail page for species `id` at `now`. Returns `None` if
  /// the species does not exist.
  pub async fn detail<S>(
    &self,
    store: &S,
    now: DateTime<Utc>,
    id: SpeciesId,
  ) -> Result<Option<DetailView>, S::Error>
  where
    S: PokedexStore,
  {
    let species = match store.get_species(id).await? {
      Some(s) => s,
      None => return Ok(None),
    };

    // The species may be deleted between the two reads.
    let active = match store.active_sightings(now, Some(id)).await {
      Ok(active) => active,
      Err(e) => match store.get_species(id).await? {
        Some(_) => return Err(e),
        None => return Ok(None),
      },
    };
    let icon = self.icon(&species);

    let markers = active
      .iter()
      .map(|sighting| Self::marker(sighting, icon.clone()))
      .collect::<Vec<_>>();

    let entities = active
      .iter()
      .map(|sighting| EntityPosition {
        level:     sighting.stats.level,
        latitude:  sighting.latitude,
        longitude: sighting.longitude,
      })
      .collect();

    let previous_evolution = match species.previous_evolution {
      Some(prev) => store.get_species(prev).await?.map(|p| self.link(&p)),
      None => None,
    };
    let next_evolution = store.next_evolution(id).await?.map(|n| self.link(&n));

    tracing::debug!(species_id = id, markers = markers.len(), %now, "assembled detail view");

    Ok(Some(DetailView {
      as_of: now,
      markers,
      species: SpeciesDetail {
        species_id: species.species_id,
        title: species.title,
        title_en: species.title_en,
        title_jp: species.title_jp,
        description: species.description,
        icon_image_url: icon,
        entities,
        previous_evolution,
        next_evolution,
      },
    }))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn absent_evolution_links_are_omitted_from_json() {
    let detail = SpeciesDetail {
      species_id:         1,
      title:              "Бульбазавр".into(),
      title_en:           Some("Bulbasaur".into()),
      title_jp:           None,
      description:        None,
      icon_image_url:     crate::image::DEFAULT_IMAGE_URL.into(),
      entities:           vec![],
      previous_evolution: None,
      next_evolution:     None,
    };
    let json = serde_json::to_value(&detail).unwrap();
    assert!(json.get("previous_evolution").is_none());
    assert!(json.get("next_evolution").is_none());
    assert_eq!(json["title_en"], "Bulbasaur");
  }

  #[test]
  fn link_uses_primary_title_and_resolved_icon() {
    let views = ViewAssembler::new(ImageResolver::new("http://h", "/media/"));
    let species = Species {
      species_id:         7,
      title:              "Ивизавр".into(),
      title_en:           Some("Ivysaur".into()),
      title_jp:           None,
      image:              Some("pokemons_image/ivysaur.png".into()),
      description:        None,
      previous_evolution: None,
    };
    let link = views.link(&species);
    assert_eq!(link.species_id, 7);
    assert_eq!(link.display_title, "Ивизавр");
    assert_eq!(link.icon_image_url, "http://h/media/pokemons_image/ivysaur.png");
  }
}
