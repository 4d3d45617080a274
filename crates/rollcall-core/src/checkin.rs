//! The kiosk check-in flow, written once over any [`AttendanceStore`].

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::{clock, event::CheckInEvent, store::AttendanceStore};

/// Why a check-in attempt was rejected. In every case no row was written.
#[derive(Debug, Error)]
pub enum CheckInError<E> {
  #[error("identifier is required")]
  EmptyIdentifier,

  #[error("identifier not found: {0:?}")]
  UnknownIdentifier(String),

  #[error("store error: {0}")]
  Store(#[source] E),
}

/// Confirmation returned to the kiosk after a successful check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInReceipt {
  /// Display name of the matched person.
  pub full_name: String,
  pub event:     CheckInEvent,
}

/// Record a check-in for `raw_identifier` at the current civil instant.
pub async fn check_in<S: AttendanceStore>(
  store: &S,
  raw_identifier: &str,
) -> Result<CheckInReceipt, CheckInError<S::Error>> {
  check_in_at(store, raw_identifier, clock::civil_now()).await
}

/// Record a check-in at an explicit instant. Split out so tests can pin the
/// clock.
///
/// Surrounding whitespace is trimmed before lookup. An empty or unknown
/// identifier is rejected with no side effect; a failed insert surfaces the
/// store error unchanged (the single-row insert is atomic, so nothing is
/// left behind). No retries anywhere: the caller must re-submit.
pub async fn check_in_at<S: AttendanceStore>(
  store: &S,
  raw_identifier: &str,
  at: DateTime<FixedOffset>,
) -> Result<CheckInReceipt, CheckInError<S::Error>> {
  let identifier = raw_identifier.trim();
  if identifier.is_empty() {
    return Err(CheckInError::EmptyIdentifier);
  }

  let person = store
    .get_person(identifier)
    .await
    .map_err(CheckInError::Store)?
    .ok_or_else(|| CheckInError::UnknownIdentifier(identifier.to_owned()))?;

  let event = store
    .append_check_in(identifier, at)
    .await
    .map_err(CheckInError::Store)?;

  Ok(CheckInReceipt {
    full_name: person.full_name,
    event,
  })
}
