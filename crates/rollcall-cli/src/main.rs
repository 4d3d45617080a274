//! `rollcall` — command-line surface for the attendance store.
//!
//! The kiosk action (`checkin`) and the admin actions (`daily`, `monthly`,
//! `import`, `export`, `template`, `stats`) work against either backend:
//! the embedded SQLite file by default, or a MySQL server when
//! `--database-url` is given. `purge` is the offline maintenance utility —
//! it wipes every table and exists outside the normal application flow.
//!
//! The CLI has direct store access and no credential prompt: like the
//! original kiosk console, whoever can reach the database file is already
//! inside the trust boundary. The HTTP server is the gated surface.

mod commands;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use rollcall_store_mysql::MySqlStore;
use rollcall_store_sqlite::{paths, SqliteStore};

#[derive(Parser)]
#[command(name = "rollcall", about = "Kiosk attendance check-in and admin tools")]
struct Cli {
  /// Path to the embedded SQLite file (default: per-user data directory).
  #[arg(long, value_name = "FILE", global = true)]
  store: Option<PathBuf>,

  /// Use the MySQL backend at this URL instead of the embedded file.
  #[arg(long, value_name = "URL", env = "ROLLCALL_DATABASE_URL", global = true)]
  database_url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Record a check-in for an identifier (SR Code).
  Checkin {
    identifier: String,
  },

  /// Show the attendance log for one date (YYYY-MM-DD).
  Daily {
    date: String,

    /// Write the result as CSV to this file instead of printing.
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Re-run the query every 10 seconds until interrupted.
    #[arg(long)]
    watch: bool,
  },

  /// Show the attendance log for one calendar month.
  Monthly {
    /// Month number, 1-12.
    month: u32,
    year:  i32,

    /// Write the result as CSV to this file instead of printing.
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
  },

  /// Bulk-import a roster CSV (insert-or-replace keyed by identifier).
  Import {
    file: PathBuf,
  },

  /// Write the empty roster template CSV for filling in.
  Template {
    /// Output file (default: stdout).
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
  },

  /// Show store statistics.
  Stats,

  /// OFFLINE MAINTENANCE: delete every check-in event and every person.
  Purge {
    /// Required confirmation.
    #[arg(long)]
    yes: bool,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  match &cli.database_url {
    Some(url) => {
      let store = MySqlStore::connect(url)
        .await
        .context("failed to connect to MySQL store")?;
      commands::run(store, cli.command).await
    },
    None => {
      let path = match &cli.store {
        Some(p) => p.clone(),
        None => paths::user_data_path(paths::DB_FILE_NAME)?,
      };
      let store = SqliteStore::open(&path)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      commands::run(store, cli.command).await
    },
  }
}
