//! The `AttendanceStore` trait.
//!
//! The trait is implemented by storage backends (`rollcall-store-sqlite` for
//! the embedded single-file database, `rollcall-store-mysql` for the
//! client/server database). Higher layers (`rollcall-server`, `rollcall-cli`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::{
  event::{CheckInEvent, DailyRow, MonthlyRow},
  person::Person,
};

/// Abstraction over an attendance store backend.
///
/// The check-in log is append-only: no method updates or deletes individual
/// events. [`purge_all`](AttendanceStore::purge_all) exists solely for the
/// offline maintenance utility and wipes everything.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait AttendanceStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Roster ────────────────────────────────────────────────────────────

  /// Retrieve a person by exact identifier. Returns `None` if not found.
  fn get_person<'a>(
    &'a self,
    identifier: &'a str,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// Apply a batch of insert-or-replace writes keyed by identifier, as one
  /// transaction. Either every row lands or none does. Returns the number of
  /// rows applied.
  fn upsert_roster<'a>(
    &'a self,
    people: &'a [Person],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  // ── Check-in log — append-only ────────────────────────────────────────

  /// Append one check-in for `identifier` at the given civil instant.
  ///
  /// The store derives `recorded_time` (second precision) and
  /// `recorded_date` from `at`, assigns the sequence id, and inserts the row
  /// in its own implicit transaction. Fails if the identifier does not
  /// reference an existing person (foreign key).
  fn append_check_in<'a>(
    &'a self,
    identifier: &'a str,
    at: DateTime<FixedOffset>,
  ) -> impl Future<Output = Result<CheckInEvent, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All events recorded on `date`, joined to the roster, ordered by
  /// recorded time descending (most recent first).
  fn daily_log(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<DailyRow>, Self::Error>> + Send + '_;

  /// All events recorded in calendar month `month` of `year`, joined to the
  /// roster, ordered by recorded time descending.
  fn monthly_log(
    &self,
    month: u32,
    year: i32,
  ) -> impl Future<Output = Result<Vec<MonthlyRow>, Self::Error>> + Send + '_;

  /// Total number of events in the log.
  fn event_count(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Access gate ───────────────────────────────────────────────────────

  /// Plain-string credential check against the stored admin row.
  ///
  /// This is a placeholder access gate, not an authentication subsystem:
  /// credentials are stored and compared as plain text on purpose, matching
  /// the kiosk's trust model (a physically supervised console).
  fn verify_admin<'a>(
    &'a self,
    username: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Offline maintenance ───────────────────────────────────────────────

  /// Delete every event, then every person, in one transaction. Used only by
  /// the offline purge utility, never by the running application.
  fn purge_all(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
