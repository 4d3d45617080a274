//! Check-in events and the typed rows returned by attendance queries.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One check-in, appended by a successful kiosk action.
///
/// Events are immutable after insertion and never updated or deleted by the
/// running system. `recorded_date` is stored redundantly next to
/// `recorded_time` so date filters are plain equality checks; both fields are
/// always derived from the same civil instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInEvent {
  /// Store-assigned surrogate key, strictly increasing, never reused.
  pub sequence_id:   i64,
  pub identifier:    String,
  pub recorded_time: NaiveDateTime,
  pub recorded_date: NaiveDate,
}

/// One row of the daily attendance query (events on a single date, joined to
/// the roster, newest first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRow {
  pub identifier:          String,
  pub full_name:           String,
  pub organizational_unit: Option<String>,
  pub program:             Option<String>,
  /// 12-hour display form of the recorded time, e.g. `09:15:00 AM`.
  pub time_in:             String,
}

/// One row of the monthly attendance query. Same shape as [`DailyRow`] plus
/// the date, since a month spans many of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRow {
  pub date:                NaiveDate,
  pub identifier:          String,
  pub full_name:           String,
  pub organizational_unit: Option<String>,
  pub program:             Option<String>,
  pub time_in:             String,
}

/// Outcome of a batch roster import. The batch either committed as a whole
/// (`imported` rows applied, `skipped` malformed rows dropped) or the
/// operation errored and nothing was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
  pub imported: usize,
  pub skipped:  usize,
}
