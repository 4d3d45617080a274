//! Storage-location conventions for the embedded database file.
//!
//! The original deployments resolved the database two different ways: next to
//! the application's bundled resources, or in a per-user persistent data
//! directory. Both matter only for upgrade continuity, not for the data
//! model, so they are plain path helpers here and the caller picks one.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::{Error, Result};

/// Default file name of the embedded database.
pub const DB_FILE_NAME: &str = "attendance.db";

/// Resolve `file_name` relative to the running executable's directory.
pub fn bundled_path(file_name: &str) -> Result<PathBuf> {
  let exe = std::env::current_exe().map_err(Error::Io)?;
  let dir = exe
    .parent()
    .ok_or(Error::NoDataDirectory)?
    .to_path_buf();
  Ok(dir.join(file_name))
}

/// Resolve `file_name` inside the platform's per-user data directory for
/// this application, creating the directory if needed.
pub fn user_data_path(file_name: &str) -> Result<PathBuf> {
  let dirs = ProjectDirs::from("", "", "rollcall").ok_or(Error::NoDataDirectory)?;
  let dir = dirs.data_dir();
  std::fs::create_dir_all(dir).map_err(Error::Io)?;
  Ok(dir.join(file_name))
}
