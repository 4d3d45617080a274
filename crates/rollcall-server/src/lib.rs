//! JSON/CSV HTTP surface for the Rollcall attendance system.
//!
//! Exposes an axum [`Router`] backed by any
//! [`rollcall_core::store::AttendanceStore`]. The kiosk check-in endpoint is
//! open; the administrative query, export and import endpoints sit behind the
//! placeholder Basic-auth gate (see [`auth`]).

pub mod attendance;
pub mod auth;
pub mod checkin;
pub mod error;
pub mod roster;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use rollcall_core::store::AttendanceStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which backend the server opens at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  Sqlite,
  Mysql,
}

/// Where the embedded database file lives when no explicit path is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreLocation {
  /// Next to the server executable, like the first original deployment.
  Bundled,
  /// In the platform's per-user data directory, like the second.
  UserData,
}

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `ROLLCALL_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:    String,
  pub port:    u16,
  pub backend: Backend,

  /// Explicit path to the SQLite file; overrides `store_location`.
  #[serde(default)]
  pub store_path: Option<PathBuf>,
  #[serde(default = "default_store_location")]
  pub store_location: StoreLocation,

  /// Connection URL for the MySQL backend.
  #[serde(default)]
  pub database_url: Option<String>,
}

fn default_store_location() -> StoreLocation {
  StoreLocation::UserData
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: AttendanceStore> {
  pub store: Arc<S>,
}

// Manual impl: `#[derive(Clone)]` would demand `S: Clone`.
impl<S: AttendanceStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the attendance server.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: AttendanceStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Kiosk
    .route("/api/check-ins", post(checkin::create::<S>))
    // Admin — each handler takes the auth-gate extractor.
    .route("/api/attendance/daily", get(attendance::daily::<S>))
    .route("/api/attendance/monthly", get(attendance::monthly::<S>))
    .route("/api/roster/import", post(roster::import::<S>))
    .route("/api/roster/template", get(roster::template::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
