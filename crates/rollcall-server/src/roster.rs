//! Handlers for the admin roster import and template download.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/roster/import` | Gated; body is the CSV text |
//! | `GET`  | `/api/roster/template` | Gated; empty template CSV |

use axum::{
  extract::State,
  http::header,
  response::{IntoResponse, Response},
  Json,
};

use rollcall_core::{event::ImportReport, roster, store::AttendanceStore};

use crate::{auth::AdminGate, error::ApiError, AppState};

/// `POST /api/roster/import` — body: roster CSV, UTF-8.
///
/// The whole batch commits or nothing does; the report says how many rows
/// were applied and how many malformed rows were skipped, with no per-row
/// failure detail.
pub async fn import<S>(
  _gate: AdminGate,
  State(state): State<AppState<S>>,
  body: String,
) -> Result<Json<ImportReport>, ApiError>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let parsed = roster::parse_roster(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let imported = state
    .store
    .upsert_roster(&parsed.people)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(imported, skipped = parsed.skipped, "roster imported");

  Ok(Json(ImportReport {
    imported,
    skipped: parsed.skipped,
  }))
}

/// `GET /api/roster/template`
pub async fn template<S>(_gate: AdminGate, State(_): State<AppState<S>>) -> Response
where
  S: AttendanceStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  (
    [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
    roster::template(),
  )
    .into_response()
}
