//! Command implementations, written once over any [`AttendanceStore`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;

use rollcall_core::{
  checkin::{check_in, CheckInError},
  clock,
  event::{DailyRow, MonthlyRow},
  roster,
  store::AttendanceStore,
};

use crate::Command;

/// Dispatch one parsed command against the opened store.
pub async fn run<S>(store: S, command: Command) -> Result<()>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  match command {
    Command::Checkin { identifier } => checkin(&store, &identifier).await,
    Command::Daily { date, csv, watch } => daily(&store, &date, csv, watch).await,
    Command::Monthly { month, year, csv } => monthly(&store, month, year, csv).await,
    Command::Import { file } => import(&store, &file).await,
    Command::Template { out } => template(out),
    Command::Stats => stats(&store).await,
    Command::Purge { yes } => purge(&store, yes).await,
  }
}

// ─── Kiosk ───────────────────────────────────────────────────────────────────

async fn checkin<S>(store: &S, identifier: &str) -> Result<()>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  match check_in(store, identifier).await {
    Ok(receipt) => {
      println!(
        "{} ({}) checked in at {}",
        receipt.full_name.to_uppercase(),
        receipt.event.identifier,
        clock::format_time(receipt.event.recorded_time),
      );
      Ok(())
    },
    // Validation failures are per-attempt and never retried; the user
    // re-submits.
    Err(CheckInError::EmptyIdentifier) => bail!("identifier is required"),
    Err(CheckInError::UnknownIdentifier(id)) => bail!("identifier {id:?} not found"),
    Err(CheckInError::Store(e)) => Err(e).context("check-in failed"),
  }
}

// ─── Admin queries ───────────────────────────────────────────────────────────

fn parse_date(raw: &str) -> Result<NaiveDate> {
  clock::parse_date(raw)
    .ok_or_else(|| rollcall_core::Error::BadDate(raw.to_owned()))
    .context("expected YYYY-MM-DD")
}

fn print_daily(date: NaiveDate, rows: &[DailyRow]) {
  println!("Attendance for {}: {} check-in(s)", clock::format_date(date), rows.len());
  for r in rows {
    println!(
      "  {:<12}  {:<30}  {:<10}  {:<10}  {}",
      r.identifier,
      r.full_name,
      r.organizational_unit.as_deref().unwrap_or("-"),
      r.program.as_deref().unwrap_or("-"),
      r.time_in,
    );
  }
}

async fn daily<S>(store: &S, raw_date: &str, csv: Option<PathBuf>, watch: bool) -> Result<()>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let date = parse_date(raw_date)?;

  if let Some(out) = csv {
    let rows = store.daily_log(date).await.context("daily query failed")?;
    std::fs::write(&out, roster::export_daily(date, &rows))
      .with_context(|| format!("failed to write {out:?}"))?;
    println!("wrote {} row(s) to {}", rows.len(), out.display());
    return Ok(());
  }

  if watch {
    // One query per tick, each running to completion before the next is
    // scheduled; nothing overlaps.
    let mut ticks = tokio::time::interval(Duration::from_secs(10));
    loop {
      ticks.tick().await;
      let rows = store.daily_log(date).await.context("daily query failed")?;
      print_daily(date, &rows);
    }
  }

  let rows = store.daily_log(date).await.context("daily query failed")?;
  print_daily(date, &rows);
  Ok(())
}

async fn monthly<S>(store: &S, month: u32, year: i32, csv: Option<PathBuf>) -> Result<()>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  clock::month_bounds(month, year)?;

  let rows: Vec<MonthlyRow> = store
    .monthly_log(month, year)
    .await
    .context("monthly query failed")?;

  if let Some(out) = csv {
    std::fs::write(&out, roster::export_monthly(&rows))
      .with_context(|| format!("failed to write {out:?}"))?;
    println!("wrote {} row(s) to {}", rows.len(), out.display());
    return Ok(());
  }

  println!("Attendance for {year}-{month:02}: {} check-in(s)", rows.len());
  for r in &rows {
    println!(
      "  {}  {:<12}  {:<30}  {:<10}  {:<10}  {}",
      clock::format_date(r.date),
      r.identifier,
      r.full_name,
      r.organizational_unit.as_deref().unwrap_or("-"),
      r.program.as_deref().unwrap_or("-"),
      r.time_in,
    );
  }
  Ok(())
}

// ─── Roster import / template ────────────────────────────────────────────────

async fn import<S>(store: &S, file: &Path) -> Result<()>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let text = std::fs::read_to_string(file)
    .with_context(|| format!("failed to read {file:?}"))?;
  let parsed = roster::parse_roster(&text)?;

  if parsed.skipped > 0 {
    tracing::warn!(skipped = parsed.skipped, "malformed roster rows were skipped");
  }

  let imported = store
    .upsert_roster(&parsed.people)
    .await
    .context("roster import failed; nothing was written")?;

  println!("imported {imported} person(s), skipped {} malformed row(s)", parsed.skipped);
  Ok(())
}

fn template(out: Option<PathBuf>) -> Result<()> {
  match out {
    Some(path) => {
      std::fs::write(&path, roster::template())
        .with_context(|| format!("failed to write {path:?}"))?;
      println!("wrote template to {}", path.display());
    },
    None => print!("{}", roster::template()),
  }
  Ok(())
}

// ─── Maintenance ─────────────────────────────────────────────────────────────

async fn stats<S>(store: &S) -> Result<()>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let events = store.event_count().await.context("count query failed")?;
  println!("check-in events: {events}");
  Ok(())
}

async fn purge<S>(store: &S, yes: bool) -> Result<()>
where
  S: AttendanceStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !yes {
    bail!("purge deletes every person and every check-in event; pass --yes to confirm");
  }
  store.purge_all().await.context("purge failed")?;
  println!("store purged");
  Ok(())
}
