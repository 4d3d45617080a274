//! Error types for `rollcall-core`.

use thiserror::Error;

/// Validation failures shared by the query and import surfaces. Check-in
/// rejections have their own type, [`crate::checkin::CheckInError`], because
/// they carry the backend's error as a source.
#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid date: {0:?}")]
  BadDate(String),

  #[error("invalid month: {0} (expected 1..=12)")]
  BadMonth(u32),

  #[error("roster file is empty")]
  EmptyRoster,

  #[error("unexpected roster header: {0:?}")]
  BadRosterHeader(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
