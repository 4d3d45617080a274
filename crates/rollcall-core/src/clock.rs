//! Civil-time handling.
//!
//! All recorded timestamps use a fixed UTC+8 offset regardless of the host
//! machine's locale. Both the timestamp and its redundant date column are
//! derived here from a single instant, so they cannot disagree.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::{Error, Result};

/// The fixed civil offset, in hours east of UTC.
pub const CIVIL_OFFSET_HOURS: i32 = 8;

/// The civil time zone as a [`FixedOffset`].
pub fn civil_offset() -> FixedOffset {
  // 8 * 3600 is well inside FixedOffset's valid range.
  FixedOffset::east_opt(CIVIL_OFFSET_HOURS * 3600).unwrap()
}

/// The current instant, expressed in the civil time zone.
pub fn civil_now() -> DateTime<FixedOffset> {
  Utc::now().with_timezone(&civil_offset())
}

/// Format a civil timestamp the way it is persisted: `YYYY-MM-DD HH:MM:SS`.
///
/// Lexicographic order of this format agrees with chronological order, which
/// the stores rely on for `ORDER BY recorded_time DESC`.
pub fn format_time(t: NaiveDateTime) -> String {
  t.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a civil date the way it is persisted: `YYYY-MM-DD`.
pub fn format_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

/// Format a civil timestamp for display in query results: `HH:MM:SS AM/PM`.
pub fn format_time_12h(t: NaiveDateTime) -> String {
  t.format("%I:%M:%S %p").to_string()
}

pub fn parse_time(s: &str) -> Option<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// The half-open date range `[first, next_first)` covering calendar month
/// `month` of `year`. Shared by both backends so the monthly filter is a
/// plain range comparison over the redundant date column.
pub fn month_bounds(month: u32, year: i32) -> Result<(NaiveDate, NaiveDate)> {
  if !(1..=12).contains(&month) {
    return Err(Error::BadMonth(month));
  }
  let first = NaiveDate::from_ymd_opt(year, month, 1)
    .ok_or_else(|| Error::BadDate(format!("{year}-{month:02}")))?;
  let next = if month == 12 {
    NaiveDate::from_ymd_opt(year + 1, 1, 1)
  } else {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
  }
  .ok_or_else(|| Error::BadDate(format!("{year}-{month:02}")))?;
  Ok((first, next))
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, Timelike};

  use super::*;

  #[test]
  fn offset_is_plus_eight() {
    assert_eq!(civil_offset().local_minus_utc(), 8 * 3600);
  }

  #[test]
  fn civil_now_matches_utc_shifted() {
    let civil = civil_now();
    let utc = civil.with_timezone(&Utc);
    // Same instant; only the offset differs.
    assert_eq!(civil.timestamp(), utc.timestamp());
  }

  #[test]
  fn persisted_formats() {
    let t = NaiveDate::from_ymd_opt(2024, 6, 1)
      .unwrap()
      .and_hms_opt(9, 15, 0)
      .unwrap();
    assert_eq!(format_time(t), "2024-06-01 09:15:00");
    assert_eq!(format_date(t.date()), "2024-06-01");
    assert_eq!(format_time_12h(t), "09:15:00 AM");
  }

  #[test]
  fn twelve_hour_afternoon() {
    let t = NaiveDate::from_ymd_opt(2024, 6, 1)
      .unwrap()
      .and_hms_opt(14, 5, 9)
      .unwrap();
    assert_eq!(t.hour(), 14);
    assert_eq!(format_time_12h(t), "02:05:09 PM");
  }

  #[test]
  fn round_trip_parse() {
    let t = parse_time("2024-06-01 09:15:00").unwrap();
    assert_eq!(format_time(t), "2024-06-01 09:15:00");
    let d = parse_date("2024-06-01").unwrap();
    assert_eq!(format_date(d), "2024-06-01");
    assert!(parse_time("2024-06-01").is_none());
    assert!(parse_date("June 1, 2024").is_none());
  }

  #[test]
  fn month_bounds_half_open() {
    let (first, next) = month_bounds(6, 2024).unwrap();
    assert_eq!(first, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(next, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
  }

  #[test]
  fn month_bounds_december_wraps_year() {
    let (first, next) = month_bounds(12, 2024).unwrap();
    assert_eq!(first, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    assert_eq!(next, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
  }

  #[test]
  fn month_bounds_rejects_out_of_range() {
    assert!(matches!(month_bounds(0, 2024), Err(crate::Error::BadMonth(0))));
    assert!(matches!(month_bounds(13, 2024), Err(crate::Error::BadMonth(13))));
  }
}
