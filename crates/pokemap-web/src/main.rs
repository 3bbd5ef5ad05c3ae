//! pokemap server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the sighting map over HTTP.
//!
//! # Loading data
//!
//! Species and sightings are imported from a JSON fixture (see
//! [`pokemap_web::fixture`]):
//!
//! ```text
//! cargo run -p pokemap-web --bin pokemap -- --load fixture.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use pokemap_store_sqlite::SqliteStore;
use pokemap_web::{AppState, ServerConfig, fixture};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Pokémon sighting map server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Import species and sightings from a JSON fixture and exit.
  #[arg(long, value_name = "FILE")]
  load: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to read config {:?}", cli.config))?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: import a fixture and exit.
  if let Some(path) = cli.load {
    let raw = std::fs::read_to_string(&path)
      .with_context(|| format!("failed to read fixture {path:?}"))?;
    let data: fixture::Fixture = serde_json::from_str(&raw)
      .with_context(|| format!("failed to parse fixture {path:?}"))?;
    let summary = fixture::load(&store, data)
      .await
      .context("failed to import fixture")?;
    println!(
      "imported {} species and {} sightings",
      summary.species, summary.sightings
    );
    return Ok(());
  }

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let state = AppState::new(store, server_cfg).context("failed to build app state")?;
  let app = pokemap_web::router(state);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
