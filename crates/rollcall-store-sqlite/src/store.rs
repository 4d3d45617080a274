//! [`SqliteStore`] — the SQLite implementation of [`AttendanceStore`].

use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate};
use rusqlite::OptionalExtension as _;

use rollcall_core::{
  clock,
  event::{CheckInEvent, DailyRow, MonthlyRow},
  person::Person,
  store::AttendanceStore,
};

use crate::{schema::SCHEMA, Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An attendance store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

}

/// Convert a persisted `time_in` back to the 12-hour display form.
fn display_time(time_in: &str) -> Result<String> {
  let t = clock::parse_time(time_in)
    .ok_or_else(|| Error::DateParse(format!("bad time_in: {time_in:?}")))?;
  Ok(clock::format_time_12h(t))
}

fn decode_date(date_in: &str) -> Result<NaiveDate> {
  clock::parse_date(date_in)
    .ok_or_else(|| Error::DateParse(format!("bad date_in: {date_in:?}")))
}

/// A `check_in_event` row joined to `person`, as it comes off the wire
/// before any
/// date/time decoding.
struct RawLogRow {
  date_in:             String,
  identifier:          String,
  full_name:           String,
  organizational_unit: Option<String>,
  program:             Option<String>,
  time_in:             String,
}

// ─── AttendanceStore impl ────────────────────────────────────────────────────

impl AttendanceStore for SqliteStore {
  type Error = Error;

  // ── Roster ────────────────────────────────────────────────────────────────

  async fn get_person(&self, identifier: &str) -> Result<Option<Person>> {
    let id = identifier.to_owned();

    let person = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT identifier, full_name, organizational_unit, program, site
               FROM person WHERE identifier = ?1",
              rusqlite::params![id],
              |row| {
                Ok(Person {
                  identifier:          row.get(0)?,
                  full_name:           row.get(1)?,
                  organizational_unit: row.get(2)?,
                  program:             row.get(3)?,
                  site:                row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(person)
  }

  async fn upsert_roster(&self, people: &[Person]) -> Result<usize> {
    let batch = people.to_vec();

    let applied = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for p in &batch {
          tx.execute(
            "INSERT OR REPLACE INTO person
               (identifier, full_name, organizational_unit, program, site)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
              p.identifier,
              p.full_name,
              p.organizational_unit,
              p.program,
              p.site,
            ],
          )?;
        }
        tx.commit()?;
        Ok(batch.len())
      })
      .await?;

    Ok(applied)
  }

  // ── Check-in log — append-only ────────────────────────────────────────────

  async fn append_check_in(
    &self,
    identifier: &str,
    at: DateTime<FixedOffset>,
  ) -> Result<CheckInEvent> {
    let recorded_time = at.naive_local();
    let recorded_date = recorded_time.date();

    let id       = identifier.to_owned();
    let time_str = clock::format_time(recorded_time);
    let date_str = clock::format_date(recorded_date);

    let sequence_id: Option<i64> = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM person WHERE identifier = ?1",
            rusqlite::params![id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(None);
        }

        conn.execute(
          "INSERT INTO check_in_event (identifier, time_in, date_in)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id, time_str, date_str],
        )?;
        Ok(Some(conn.last_insert_rowid()))
      })
      .await?;

    let sequence_id =
      sequence_id.ok_or_else(|| Error::UnknownIdentifier(identifier.to_owned()))?;

    Ok(CheckInEvent {
      sequence_id,
      identifier: identifier.to_owned(),
      recorded_time,
      recorded_date,
    })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn daily_log(&self, date: NaiveDate) -> Result<Vec<DailyRow>> {
    let date_str = clock::format_date(date);

    let raws: Vec<RawLogRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.date_in, e.identifier, p.full_name,
                  p.organizational_unit, p.program, e.time_in
           FROM check_in_event e
           JOIN person p ON p.identifier = e.identifier
           WHERE e.date_in = ?1
           ORDER BY e.time_in DESC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![date_str], |row| {
            Ok(RawLogRow {
              date_in:             row.get(0)?,
              identifier:          row.get(1)?,
              full_name:           row.get(2)?,
              organizational_unit: row.get(3)?,
              program:             row.get(4)?,
              time_in:             row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|r| {
        Ok(DailyRow {
          identifier:          r.identifier,
          full_name:           r.full_name,
          organizational_unit: r.organizational_unit,
          program:             r.program,
          time_in:             display_time(&r.time_in)?,
        })
      })
      .collect()
  }

  async fn monthly_log(&self, month: u32, year: i32) -> Result<Vec<MonthlyRow>> {
    let (first, next) = clock::month_bounds(month, year)?;
    let (from, to) = (clock::format_date(first), clock::format_date(next));

    let raws: Vec<RawLogRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.date_in, e.identifier, p.full_name,
                  p.organizational_unit, p.program, e.time_in
           FROM check_in_event e
           JOIN person p ON p.identifier = e.identifier
           WHERE e.date_in >= ?1 AND e.date_in < ?2
           ORDER BY e.time_in DESC",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![from, to], |row| {
            Ok(RawLogRow {
              date_in:             row.get(0)?,
              identifier:          row.get(1)?,
              full_name:           row.get(2)?,
              organizational_unit: row.get(3)?,
              program:             row.get(4)?,
              time_in:             row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|r| {
        Ok(MonthlyRow {
          date:                decode_date(&r.date_in)?,
          identifier:          r.identifier,
          full_name:           r.full_name,
          organizational_unit: r.organizational_unit,
          program:             r.program,
          time_in:             display_time(&r.time_in)?,
        })
      })
      .collect()
  }

  async fn event_count(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM check_in_event", [], |row| row.get(0))?)
      })
      .await?;
    Ok(count as u64)
  }

  // ── Access gate ───────────────────────────────────────────────────────────

  async fn verify_admin(&self, username: &str, password: &str) -> Result<bool> {
    let user = username.to_owned();
    let pass = password.to_owned();

    let matched: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM admin WHERE username = ?1 AND password = ?2",
              rusqlite::params![user, pass],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(matched)
  }

  // ── Offline maintenance ───────────────────────────────────────────────────

  async fn purge_all(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM check_in_event", [])?;
        tx.execute("DELETE FROM person", [])?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
