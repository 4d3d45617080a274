//! rollcall-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! configured storage backend, and serves the attendance API over HTTP.
//! Failing to open the store at launch is fatal: nothing else can work
//! without it, so the process reports the error and exits nonzero.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use rollcall_core::store::AttendanceStore;
use rollcall_server::{AppState, Backend, ServerConfig, StoreLocation};
use rollcall_store_mysql::MySqlStore;
use rollcall_store_sqlite::{paths, SqliteStore};

#[derive(Parser)]
#[command(author, version, about = "Rollcall attendance server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ROLLCALL"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  match server_cfg.backend {
    Backend::Sqlite => {
      let path = match &server_cfg.store_path {
        Some(p) => p.clone(),
        None => match server_cfg.store_location {
          StoreLocation::Bundled => paths::bundled_path(paths::DB_FILE_NAME)?,
          StoreLocation::UserData => paths::user_data_path(paths::DB_FILE_NAME)?,
        },
      };
      let store = SqliteStore::open(&path)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      tracing::info!(?path, "opened embedded store");
      serve(store, &server_cfg).await
    },
    Backend::Mysql => {
      let url = server_cfg
        .database_url
        .as_deref()
        .context("backend = \"mysql\" requires database_url")?;
      let store = MySqlStore::connect(url)
        .await
        .context("failed to connect to MySQL store")?;
      tracing::info!("connected to MySQL store");
      serve(store, &server_cfg).await
    },
  }
}

async fn serve<S>(store: S, cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: AttendanceStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let state = AppState { store: Arc::new(store) };
  let app = rollcall_server::router(state);

  let address = format!("{}:{}", cfg.host, cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}
