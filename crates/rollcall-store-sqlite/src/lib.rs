//! Embedded single-file SQLite backend for the Rollcall attendance store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod schema;
mod store;

pub mod error;
pub mod paths;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
