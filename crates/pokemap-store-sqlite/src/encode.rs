//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed nanosecond
//! precision and a `Z` suffix, so that string comparison in SQL agrees with
//! chronological order. Ids and coordinates use native SQLite types.

use chrono::{DateTime, SecondsFormat, Utc};
use pokemap_core::{
  sighting::{BattleStats, Sighting},
  species::Species,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `species` query; matches [`species_from_row`].
pub const SPECIES_COLUMNS: &str =
  "species_id, title, title_en, title_jp, image, description, previous_evolution_id";

/// Species rows carry no encoded columns, so they map straight to the domain
/// type.
pub fn species_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Species> {
  Ok(Species {
    species_id:         row.get(0)?,
    title:              row.get(1)?,
    title_en:           row.get(2)?,
    title_jp:           row.get(3)?,
    image:              row.get(4)?,
    description:        row.get(5)?,
    previous_evolution: row.get(6)?,
  })
}

/// Column list shared by every `sightings` query; matches
/// [`RawSighting::from_row`].
pub const SIGHTING_COLUMNS: &str = "sighting_id, species_id, latitude, longitude, \
   appeared_at, disappeared_at, level, health, attack, defense, stamina";

/// A `sightings` row with its timestamps still in text form.
pub struct RawSighting {
  pub sighting_id:    i64,
  pub species_id:     i64,
  pub latitude:       f64,
  pub longitude:      f64,
  pub appeared_at:    String,
  pub disappeared_at: Option<String>,
  pub stats:          BattleStats,
}

impl RawSighting {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      sighting_id:    row.get(0)?,
      species_id:     row.get(1)?,
      latitude:       row.get(2)?,
      longitude:      row.get(3)?,
      appeared_at:    row.get(4)?,
      disappeared_at: row.get(5)?,
      stats:          BattleStats {
        level:   row.get(6)?,
        health:  row.get(7)?,
        attack:  row.get(8)?,
        defense: row.get(9)?,
        stamina: row.get(10)?,
      },
    })
  }

  pub fn into_sighting(self) -> Result<Sighting> {
    Ok(Sighting {
      sighting_id:    self.sighting_id,
      species_id:     self.species_id,
      latitude:       self.latitude,
      longitude:      self.longitude,
      appeared_at:    decode_dt(&self.appeared_at)?,
      disappeared_at: self.disappeared_at.as_deref().map(decode_dt).transpose()?,
      stats:          self.stats,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  #[test]
  fn encoded_timestamps_sort_chronologically() {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let later = base + Duration::nanoseconds(1);
    assert!(encode_dt(base) < encode_dt(later));
    assert_eq!(encode_dt(base), "2024-01-01T12:00:00.000000000Z");
    assert_eq!(encode_dt(later), "2024-01-01T12:00:00.000000001Z");
  }

  #[test]
  fn decode_accepts_offsets() {
    let dt = decode_dt("2024-01-01T15:00:00+03:00").unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
  }

  #[test]
  fn decode_rejects_garbage() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
