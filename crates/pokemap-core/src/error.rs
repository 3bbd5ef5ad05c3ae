//! Error types for `pokemap-core`.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::species::SpeciesId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("species not found: {0}")]
  SpeciesNotFound(SpeciesId),

  #[error("species {0} cannot evolve from itself")]
  SelfEvolution(SpeciesId),

  #[error(
    "sighting disappears ({disappeared_at}) before it appears ({appeared_at})"
  )]
  InvalidWindow {
    appeared_at:    DateTime<Utc>,
    disappeared_at: DateTime<Utc>,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
