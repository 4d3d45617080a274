//! The placeholder admin access gate.
//!
//! HTTP Basic credentials are decoded and compared, as plain strings, against
//! the store's single `admin` row. This is deliberately NOT an authentication
//! subsystem — no hashing, no sessions, no lockout — mirroring the kiosk's
//! trust model of a physically supervised console. Anything aiming for
//! production use replaces this wholesale.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use rollcall_core::store::AttendanceStore;

use crate::{AppState, error::ApiError};

/// Zero-size marker: present in the handler means the request passed the gate.
pub struct AdminGate;

/// Verify Basic credentials from `headers` against the store's admin row.
pub async fn verify_gate<S>(headers: &HeaderMap, store: &S) -> Result<(), ApiError>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  let ok = store
    .verify_admin(username, password)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if ok { Ok(()) } else { Err(ApiError::Unauthorized) }
}

impl<S> FromRequestParts<AppState<S>> for AdminGate
where
  S: AttendanceStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    verify_gate(&parts.headers, state.store.as_ref()).await?;
    Ok(AdminGate)
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use axum::http::{header, Request};

  use rollcall_store_sqlite::SqliteStore;

  use super::*;
  use crate::AppState;

  async fn make_state() -> AppState<SqliteStore> {
    // Seeds the default admin/library123 row.
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState { store: Arc::new(store) }
  }

  async fn extract(
    req: Request<axum::body::Body>,
    state: &AppState<SqliteStore>,
  ) -> Result<AdminGate, ApiError> {
    let (mut parts, _) = req.into_parts();
    AdminGate::from_request_parts(&mut parts, state).await
  }

  fn basic(user: &str, pass: &str) -> String {
    let encoded = B64.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
  }

  #[tokio::test]
  async fn correct_credentials() {
    let state = make_state().await;
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("admin", "library123"))
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(extract(req, &state).await.is_ok());
  }

  #[tokio::test]
  async fn wrong_password() {
    let state = make_state().await;
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("admin", "wrong"))
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(extract(req, &state).await, Err(ApiError::Unauthorized)));
  }

  #[tokio::test]
  async fn missing_header() {
    let state = make_state().await;
    let req = Request::builder().body(axum::body::Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(ApiError::Unauthorized)));
  }

  #[tokio::test]
  async fn invalid_base64() {
    let state = make_state().await;
    let req = Request::builder()
      .header(header::AUTHORIZATION, "Basic !!!not-base64!!!")
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(extract(req, &state).await, Err(ApiError::Unauthorized)));
  }
}
