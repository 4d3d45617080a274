//! [`MySqlStore`] — the MySQL implementation of [`AttendanceStore`].

use chrono::{DateTime, FixedOffset, NaiveDate};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use rollcall_core::{
  clock,
  event::{CheckInEvent, DailyRow, MonthlyRow},
  person::Person,
  store::AttendanceStore,
};

use crate::{schema::SCHEMA, Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An attendance store backed by a MySQL server.
///
/// Cloning is cheap — the inner pool is reference-counted. Several
/// application instances may share one database; the store adds no
/// coordination beyond the engine's own transactions, so the benign
/// lookup-then-insert race between instances is accepted.
#[derive(Clone)]
pub struct MySqlStore {
  pool: MySqlPool,
}

impl MySqlStore {
  /// Connect to `database_url` and run schema initialisation.
  pub async fn connect(database_url: &str) -> Result<Self> {
    let pool = MySqlPoolOptions::new()
      .max_connections(4)
      .connect(database_url)
      .await?;
    let store = Self { pool };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    for statement in SCHEMA {
      sqlx::query(statement).execute(&self.pool).await?;
    }
    Ok(())
  }
}

// ─── Row decoding ────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct RawPerson {
  identifier:          String,
  full_name:           String,
  organizational_unit: Option<String>,
  program:             Option<String>,
  site:                Option<String>,
}

impl From<RawPerson> for Person {
  fn from(r: RawPerson) -> Self {
    Person {
      identifier:          r.identifier,
      full_name:           r.full_name,
      organizational_unit: r.organizational_unit,
      program:             r.program,
      site:                r.site,
    }
  }
}

#[derive(sqlx::FromRow)]
struct RawLogRow {
  date_in:             String,
  identifier:          String,
  full_name:           String,
  organizational_unit: Option<String>,
  program:             Option<String>,
  time_in:             String,
}

fn display_time(time_in: &str) -> Result<String> {
  let t = clock::parse_time(time_in)
    .ok_or_else(|| Error::DateParse(format!("bad time_in: {time_in:?}")))?;
  Ok(clock::format_time_12h(t))
}

fn decode_date(date_in: &str) -> Result<NaiveDate> {
  clock::parse_date(date_in)
    .ok_or_else(|| Error::DateParse(format!("bad date_in: {date_in:?}")))
}

const LOG_SELECT: &str = "SELECT e.date_in, e.identifier, p.full_name,
                                 p.organizational_unit, p.program, e.time_in
                          FROM check_in_event e
                          JOIN person p ON p.identifier = e.identifier";

// ─── AttendanceStore impl ────────────────────────────────────────────────────

impl AttendanceStore for MySqlStore {
  type Error = Error;

  // ── Roster ────────────────────────────────────────────────────────────────

  async fn get_person(&self, identifier: &str) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = sqlx::query_as(
      "SELECT identifier, full_name, organizational_unit, program, site
       FROM person WHERE identifier = ?",
    )
    .bind(identifier)
    .fetch_optional(&self.pool)
    .await?;

    Ok(raw.map(Person::from))
  }

  async fn upsert_roster(&self, people: &[Person]) -> Result<usize> {
    let mut tx = self.pool.begin().await?;

    for p in people {
      sqlx::query(
        "INSERT INTO person (identifier, full_name, organizational_unit, program, site)
         VALUES (?, ?, ?, ?, ?)
         ON DUPLICATE KEY UPDATE
           full_name           = VALUES(full_name),
           organizational_unit = VALUES(organizational_unit),
           program             = VALUES(program),
           site                = VALUES(site)",
      )
      .bind(&p.identifier)
      .bind(&p.full_name)
      .bind(&p.organizational_unit)
      .bind(&p.program)
      .bind(&p.site)
      .execute(&mut *tx)
      .await?;
    }

    tx.commit().await?;
    Ok(people.len())
  }

  // ── Check-in log — append-only ────────────────────────────────────────────

  async fn append_check_in(
    &self,
    identifier: &str,
    at: DateTime<FixedOffset>,
  ) -> Result<CheckInEvent> {
    let recorded_time = at.naive_local();
    let recorded_date = recorded_time.date();

    let known: i64 =
      sqlx::query_scalar("SELECT COUNT(*) FROM person WHERE identifier = ?")
        .bind(identifier)
        .fetch_one(&self.pool)
        .await?;
    if known == 0 {
      return Err(Error::UnknownIdentifier(identifier.to_owned()));
    }

    let result = sqlx::query(
      "INSERT INTO check_in_event (identifier, time_in, date_in) VALUES (?, ?, ?)",
    )
    .bind(identifier)
    .bind(clock::format_time(recorded_time))
    .bind(clock::format_date(recorded_date))
    .execute(&self.pool)
    .await?;

    Ok(CheckInEvent {
      sequence_id: result.last_insert_id() as i64,
      identifier: identifier.to_owned(),
      recorded_time,
      recorded_date,
    })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn daily_log(&self, date: NaiveDate) -> Result<Vec<DailyRow>> {
    let sql = format!("{LOG_SELECT} WHERE e.date_in = ? ORDER BY e.time_in DESC");

    let raws: Vec<RawLogRow> = sqlx::query_as(&sql)
      .bind(clock::format_date(date))
      .fetch_all(&self.pool)
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
    let sql =
      format!("{LOG_SELECT} WHERE e.date_in >= ? AND e.date_in < ? ORDER BY e.time_in DESC");

    let raws: Vec<RawLogRow> = sqlx::query_as(&sql)
      .bind(clock::format_date(first))
      .bind(clock::format_date(next))
      .fetch_all(&self.pool)
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
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM check_in_event")
      .fetch_one(&self.pool)
      .await?;
    Ok(count as u64)
  }

  // ── Access gate ───────────────────────────────────────────────────────────

  async fn verify_admin(&self, username: &str, password: &str) -> Result<bool> {
    let matched: i64 = sqlx::query_scalar(
      "SELECT COUNT(*) FROM admin WHERE username = ? AND password = ?",
    )
    .bind(username)
    .bind(password)
    .fetch_one(&self.pool)
    .await?;

    Ok(matched > 0)
  }

  // ── Offline maintenance ───────────────────────────────────────────────────

  async fn purge_all(&self) -> Result<()> {
    let mut tx = self.pool.begin().await?;
    sqlx::query("DELETE FROM check_in_event").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM person").execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
  }
}
