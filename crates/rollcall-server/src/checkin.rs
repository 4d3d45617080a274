//! Handler for the kiosk check-in endpoint.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/check-ins` | Body: `{"identifier":"21-07343"}`; ungated |

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use rollcall_core::{
  checkin::{check_in, CheckInError},
  event::CheckInEvent,
  store::AttendanceStore,
};

use crate::{error::ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct CheckInBody {
  pub identifier: String,
}

/// Confirmation payload; the kiosk front-end shows `full_name` briefly and
/// clears it on its own schedule.
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
  pub full_name: String,
  pub event:     CheckInEvent,
}

/// `POST /api/check-ins`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CheckInBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let receipt = check_in(state.store.as_ref(), &body.identifier)
    .await
    .map_err(|e| match e {
      CheckInError::EmptyIdentifier => ApiError::BadRequest("identifier is required".into()),
      CheckInError::UnknownIdentifier(id) => {
        ApiError::NotFound(format!("identifier {id:?} not found"))
      },
      CheckInError::Store(e) => ApiError::Store(Box::new(e)),
    })?;

  tracing::info!(identifier = %receipt.event.identifier, "check-in recorded");

  Ok((
    StatusCode::CREATED,
    Json(CheckInResponse {
      full_name: receipt.full_name,
      event:     receipt.event,
    }),
  ))
}
