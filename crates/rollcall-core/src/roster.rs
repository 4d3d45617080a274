//! The delimited roster and attendance file formats.
//!
//! Comma-delimited UTF-8 text with a fixed header row. The roster format
//! (`SR Code, Full Name, College, PROGRAM, Campus`) is shared by import,
//! export and the downloadable template; attendance exports add a date and a
//! time column in front. Roster export and import use the same column schema,
//! so an exported roster re-imports to the identical identifier→fields
//! mapping.

use crate::{
  event::{DailyRow, MonthlyRow},
  person::Person,
  Error, Result,
};

/// Header row of roster files, matching the original template byte-for-byte.
pub const ROSTER_HEADER: &str = "SR Code, Full Name, College, PROGRAM, Campus";

/// Header row of attendance (log) exports.
pub const LOG_HEADER: &str = "Date, SR Code, Full Name, College, Program, Time-In";

/// Outcome of parsing a roster file: the well-formed rows plus a count of
/// malformed (fewer than five fields) rows that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRoster {
  pub people:  Vec<Person>,
  pub skipped: usize,
}

/// Parse a roster file: one header row, then one person per line.
///
/// Rows with fewer than five fields are skipped and counted, never imported
/// partially. Blank lines are ignored. Fields beyond the fifth are ignored
/// too, mirroring the original importer's destructuring of exactly five
/// columns.
pub fn parse_roster(text: &str) -> Result<ParsedRoster> {
  let mut lines = text.lines();

  let header = lines.next().ok_or(Error::EmptyRoster)?;
  if !header_matches(header) {
    return Err(Error::BadRosterHeader(header.to_owned()));
  }

  let mut people = Vec::new();
  let mut skipped = 0usize;

  for line in lines {
    if line.trim().is_empty() {
      continue;
    }
    let fields = parse_record(line);
    if fields.len() < 5 {
      skipped += 1;
      continue;
    }
    people.push(Person {
      identifier:          fields[0].trim().to_owned(),
      full_name:           fields[1].trim().to_owned(),
      organizational_unit: optional(&fields[2]),
      program:             optional(&fields[3]),
      site:                optional(&fields[4]),
    });
  }

  Ok(ParsedRoster { people, skipped })
}

/// Serialise persons in the import format. `parse_roster` of the output
/// yields the same identifier→descriptive-fields mapping.
pub fn export_roster(people: &[Person]) -> String {
  let mut out = String::from(ROSTER_HEADER);
  out.push('\n');
  for p in people {
    push_record(
      &mut out,
      &[
        &p.identifier,
        &p.full_name,
        p.organizational_unit.as_deref().unwrap_or(""),
        p.program.as_deref().unwrap_or(""),
        p.site.as_deref().unwrap_or(""),
      ],
    );
  }
  out
}

/// Serialise a daily query result in the log-export format. Every row shares
/// the one queried date.
pub fn export_daily(date: chrono::NaiveDate, rows: &[DailyRow]) -> String {
  let date_str = crate::clock::format_date(date);
  let mut out = String::from(LOG_HEADER);
  out.push('\n');
  for r in rows {
    push_record(
      &mut out,
      &[
        &date_str,
        &r.identifier,
        &r.full_name,
        r.organizational_unit.as_deref().unwrap_or(""),
        r.program.as_deref().unwrap_or(""),
        &r.time_in,
      ],
    );
  }
  out
}

/// Serialise a monthly query result in the log-export format.
pub fn export_monthly(rows: &[MonthlyRow]) -> String {
  let mut out = String::from(LOG_HEADER);
  out.push('\n');
  for r in rows {
    push_record(
      &mut out,
      &[
        &crate::clock::format_date(r.date),
        &r.identifier,
        &r.full_name,
        r.organizational_unit.as_deref().unwrap_or(""),
        r.program.as_deref().unwrap_or(""),
        &r.time_in,
      ],
    );
  }
  out
}

/// The downloadable empty template: the roster header and nothing else.
pub fn template() -> String {
  let mut out = String::from(ROSTER_HEADER);
  out.push('\n');
  out
}

// ─── Record-level helpers ────────────────────────────────────────────────────

fn header_matches(line: &str) -> bool {
  let got: Vec<String> = parse_record(line)
    .iter()
    .map(|f| f.trim().to_ascii_lowercase())
    .collect();
  let want: Vec<String> = parse_record(ROSTER_HEADER)
    .iter()
    .map(|f| f.trim().to_ascii_lowercase())
    .collect();
  got == want
}

fn optional(field: &str) -> Option<String> {
  let t = field.trim();
  if t.is_empty() { None } else { Some(t.to_owned()) }
}

/// Split one CSV line into fields, honouring double-quoted fields with
/// doubled-quote escapes.
fn parse_record(line: &str) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  let mut buf = String::new();
  let mut in_quotes = false;
  let chars: Vec<char> = line.chars().collect();
  let mut i = 0usize;
  while i < chars.len() {
    let ch = chars[i];
    if ch == '"' {
      if in_quotes && i + 1 < chars.len() && chars[i + 1] == '"' {
        buf.push('"');
        i += 2;
        continue;
      }
      in_quotes = !in_quotes;
      i += 1;
      continue;
    }
    if ch == ',' && !in_quotes {
      out.push(buf);
      buf = String::new();
      i += 1;
      continue;
    }
    buf.push(ch);
    i += 1;
  }
  out.push(buf);
  out
}

fn quote(s: &str) -> String {
  if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
    format!("\"{}\"", s.replace('"', "\"\""))
  } else {
    s.to_string()
  }
}

fn push_record(out: &mut String, fields: &[&str]) {
  let quoted: Vec<String> = fields.iter().map(|f| quote(f)).collect();
  out.push_str(&quoted.join(","));
  out.push('\n');
}
