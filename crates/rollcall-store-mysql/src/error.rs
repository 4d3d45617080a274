//! Error type for `rollcall-store-mysql`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rollcall_core::Error),

  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("no identifier {0:?} in the roster")]
  UnknownIdentifier(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
