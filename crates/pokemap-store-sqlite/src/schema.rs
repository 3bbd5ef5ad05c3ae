//! SQL schema for the pokemap SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Timestamps are fixed-width RFC 3339 UTC strings (see `encode_dt`), so
/// lexical comparison in SQL matches chronological order.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS species (
    species_id            INTEGER PRIMARY KEY AUTOINCREMENT,
    title                 TEXT NOT NULL,
    title_en              TEXT,
    title_jp              TEXT,
    image                 TEXT,      -- path relative to the media root
    description           TEXT,
    previous_evolution_id INTEGER REFERENCES species(species_id) ON DELETE SET NULL,
    CHECK (previous_evolution_id IS NULL OR previous_evolution_id != species_id)
);

CREATE TABLE IF NOT EXISTS sightings (
    sighting_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    species_id     INTEGER NOT NULL REFERENCES species(species_id) ON DELETE CASCADE,
    latitude       REAL NOT NULL,
    longitude      REAL NOT NULL,
    appeared_at    TEXT NOT NULL,
    disappeared_at TEXT,            -- NULL: open window, never on the map
    level          INTEGER,
    health         INTEGER,
    attack         INTEGER,
    defense        INTEGER,
    stamina        INTEGER,
    CHECK (disappeared_at IS NULL OR disappeared_at >= appeared_at)
);

CREATE INDEX IF NOT EXISTS species_previous_idx ON species(previous_evolution_id);
CREATE INDEX IF NOT EXISTS sightings_species_idx ON sightings(species_id);
CREATE INDEX IF NOT EXISTS sightings_window_idx  ON sightings(appeared_at, disappeared_at);

PRAGMA user_version = 1;
";
