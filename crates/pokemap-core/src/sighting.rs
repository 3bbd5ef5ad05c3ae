//! Sightings — timestamped, geo-located occurrences of a species.
//!
//! A sighting is visible on the map while the query instant falls inside its
//! `[appeared_at, disappeared_at]` window. A sighting with no
//! `disappeared_at` has an open window and is never considered visible; the
//! store query and [`Sighting::is_visible_at`] agree on this.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, species::SpeciesId};

/// Store-assigned identifier of a [`Sighting`].
pub type SightingId = i64;

// ─── Stats ───────────────────────────────────────────────────────────────────

/// Optional battle stats recorded alongside a sighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStats {
  pub level:   Option<i32>,
  pub health:  Option<i32>,
  pub attack:  Option<i32>,
  pub defense: Option<i32>,
  pub stamina: Option<i32>,
}

// ─── Sighting ────────────────────────────────────────────────────────────────

/// One occurrence of a species on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
  pub sighting_id:    SightingId,
  pub species_id:     SpeciesId,
  pub latitude:       f64,
  pub longitude:      f64,
  pub appeared_at:    DateTime<Utc>,
  pub disappeared_at: Option<DateTime<Utc>>,
  #[serde(flatten)]
  pub stats:          BattleStats,
}

impl Sighting {
  /// Whether this sighting belongs on a map drawn at `at`.
  ///
  /// Both ends of the window are inclusive. Returns `false` when
  /// `disappeared_at` is unset.
  pub fn is_visible_at(&self, at: DateTime<Utc>) -> bool {
    match self.disappeared_at {
      Some(gone) => self.appeared_at <= at && at <= gone,
      None => false,
    }
  }
}

// ─── NewSighting ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::PokedexStore::record_sighting`].
#[derive(Debug, Clone)]
pub struct NewSighting {
  pub species_id:     SpeciesId,
  pub latitude:       f64,
  pub longitude:      f64,
  pub appeared_at:    DateTime<Utc>,
  pub disappeared_at: Option<DateTime<Utc>>,
  pub stats:          BattleStats,
}

impl NewSighting {
  /// Convenience constructor for a sighting with a closed window and no
  /// stats.
  pub fn new(
    species_id: SpeciesId,
    (latitude, longitude): (f64, f64),
    appeared_at: DateTime<Utc>,
    disappeared_at: Option<DateTime<Utc>>,
  ) -> Self {
    Self {
      species_id,
      latitude,
      longitude,
      appeared_at,
      disappeared_at,
      stats: BattleStats::default(),
    }
  }

  /// Reject windows that close before they open.
  pub fn validate(&self) -> Result<()> {
    match self.disappeared_at {
      Some(gone) if gone < self.appeared_at => Err(Error::InvalidWindow {
        appeared_at:    self.appeared_at,
        disappeared_at: gone,
      }),
      _ => Ok(()),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
  }

  fn sighting(appeared: DateTime<Utc>, gone: Option<DateTime<Utc>>) -> Sighting {
    Sighting {
      sighting_id:    1,
      species_id:     1,
      latitude:       55.75,
      longitude:      37.61,
      appeared_at:    appeared,
      disappeared_at: gone,
      stats:          BattleStats::default(),
    }
  }

  #[test]
  fn closed_window_is_inclusive_at_both_ends() {
    let s = sighting(at(11, 0), Some(at(13, 0)));
    assert!(s.is_visible_at(at(11, 0)));
    assert!(s.is_visible_at(at(12, 0)));
    assert!(s.is_visible_at(at(13, 0)));
    assert!(!s.is_visible_at(at(11, 0) - Duration::seconds(1)));
    assert!(!s.is_visible_at(at(13, 0) + Duration::seconds(1)));
  }

  #[test]
  fn open_window_is_never_visible() {
    let s = sighting(at(10, 0), None);
    for instant in [at(9, 0), at(10, 0), at(10, 30), at(23, 59)] {
      assert!(!s.is_visible_at(instant), "visible at {instant}");
    }
  }

  #[test]
  fn validate_rejects_inverted_window() {
    let input = NewSighting::new(1, (0.0, 0.0), at(13, 0), Some(at(11, 0)));
    assert!(matches!(input.validate(), Err(Error::InvalidWindow { .. })));
  }

  #[test]
  fn validate_accepts_open_and_instant_windows() {
    assert!(NewSighting::new(1, (0.0, 0.0), at(10, 0), None).validate().is_ok());
    assert!(
      NewSighting::new(1, (0.0, 0.0), at(10, 0), Some(at(10, 0)))
        .validate()
        .is_ok()
    );
  }
}
