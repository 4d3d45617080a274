//! Client/server MySQL backend for the Rollcall attendance store.
//!
//! Implements the same [`rollcall_core::store::AttendanceStore`] contract as
//! the embedded backend, including the foreign-key constraint and the fixed
//! civil time zone. The original client/server deployment omitted both; that
//! omission is treated as a regression, not a feature.
//!
//! Timestamps are always computed by [`rollcall_core::clock`] on the client,
//! never by the database server's clock, so mixed-zone hosts cannot skew the
//! recorded civil times.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MySqlStore;
