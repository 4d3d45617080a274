//! Handlers for the admin attendance queries and CSV export.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/api/attendance/daily?date=YYYY-MM-DD` | Gated; `&format=csv` for export |
//! | `GET` | `/api/attendance/monthly?month=M&year=Y` | Gated; `&format=csv` for export |
//!
//! Both queries are side-effect-free and uncached: every call re-queries
//! current store state.

use axum::{
  extract::{Query, State},
  http::header,
  response::{IntoResponse, Response},
  Json,
};
use serde::Deserialize;

use rollcall_core::{clock, roster, store::AttendanceStore};

use crate::{auth::AdminGate, error::ApiError, AppState};

/// Response serialisation chosen by the `format` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
  #[default]
  Json,
  Csv,
}

fn csv_response(body: String) -> Response {
  ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response()
}

// ─── Daily ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DailyParams {
  pub date: String,
  #[serde(default)]
  pub format: Format,
}

/// `GET /api/attendance/daily?date=YYYY-MM-DD[&format=csv]`
pub async fn daily<S>(
  _gate: AdminGate,
  State(state): State<AppState<S>>,
  Query(params): Query<DailyParams>,
) -> Result<Response, ApiError>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let date = clock::parse_date(&params.date)
    .ok_or_else(|| ApiError::BadRequest(format!("invalid date: {:?}", params.date)))?;

  let rows = state
    .store
    .daily_log(date)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(match params.format {
    Format::Json => Json(rows).into_response(),
    Format::Csv => csv_response(roster::export_daily(date, &rows)),
  })
}

// ─── Monthly ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MonthlyParams {
  pub month: u32,
  pub year:  i32,
  #[serde(default)]
  pub format: Format,
}

/// `GET /api/attendance/monthly?month=M&year=Y[&format=csv]`
pub async fn monthly<S>(
  _gate: AdminGate,
  State(state): State<AppState<S>>,
  Query(params): Query<MonthlyParams>,
) -> Result<Response, ApiError>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // Reject out-of-range months up front so the store error stays a 400.
  clock::month_bounds(params.month, params.year)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let rows = state
    .store
    .monthly_log(params.month, params.year)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(match params.format {
    Format::Json => Json(rows).into_response(),
    Format::Csv => csv_response(roster::export_monthly(&rows)),
  })
}
