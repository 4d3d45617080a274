//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, FixedOffset, NaiveDate};

use rollcall_core::{checkin, clock, person::Person, roster, store::AttendanceStore};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
  NaiveDate::from_ymd_opt(y, mo, d)
    .unwrap()
    .and_hms_opt(h, mi, s)
    .unwrap()
    .and_local_timezone(clock::civil_offset())
    .unwrap()
}

fn cruz() -> Person {
  Person {
    identifier:          "21-07343".into(),
    full_name:           "Cruz, Mykel Aris B".into(),
    organizational_unit: Some("CICS".into()),
    program:             Some("BSIT".into()),
    site:                Some("Alangilan".into()),
  }
}

// ─── Roster ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_and_get_person() {
  let s = store().await;
  s.upsert_roster(&[cruz()]).await.unwrap();

  let fetched = s.get_person("21-07343").await.unwrap();
  assert_eq!(fetched, Some(cruz()));
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let s = store().await;
  assert_eq!(s.get_person("99-99999").await.unwrap(), None);
}

#[tokio::test]
async fn reimport_overwrites_without_duplicating() {
  let s = store().await;
  s.upsert_roster(&[cruz()]).await.unwrap();
  s.append_check_in("21-07343", at(2024, 6, 1, 9, 15, 0)).await.unwrap();

  let renamed = Person {
    full_name: "Cruz, Mykel Aris".into(),
    program:   Some("BSCS".into()),
    ..cruz()
  };
  s.upsert_roster(&[renamed.clone()]).await.unwrap();

  assert_eq!(s.get_person("21-07343").await.unwrap(), Some(renamed));

  // If the person row had been duplicated, the join would fan out and the
  // one event would appear twice.
  let day = s.daily_log(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).await.unwrap();
  assert_eq!(day.len(), 1);
  assert_eq!(day[0].full_name, "Cruz, Mykel Aris");
}

#[tokio::test]
async fn upsert_batch_applies_all_rows() {
  let s = store().await;
  let batch = vec![
    cruz(),
    Person::new("22-00001", "Reyes, Ana"),
    Person::new("22-00002", "Santos, Leo"),
  ];
  let applied = s.upsert_roster(&batch).await.unwrap();
  assert_eq!(applied, 3);
  assert!(s.get_person("22-00002").await.unwrap().is_some());
}

// ─── Check-in log ────────────────────────────────────────────────────────────

#[tokio::test]
async fn check_in_unknown_identifier_leaves_log_unchanged() {
  let s = store().await;
  s.upsert_roster(&[cruz()]).await.unwrap();

  let err = s.append_check_in("99-99999", at(2024, 6, 1, 9, 15, 0)).await.unwrap_err();
  assert!(matches!(err, Error::UnknownIdentifier(ref id) if id == "99-99999"));
  assert_eq!(s.event_count().await.unwrap(), 0);
}

#[tokio::test]
async fn check_in_appends_one_event_with_consistent_date() {
  let s = store().await;
  s.upsert_roster(&[cruz()]).await.unwrap();

  let event = s.append_check_in("21-07343", at(2024, 6, 1, 9, 15, 0)).await.unwrap();
  assert_eq!(s.event_count().await.unwrap(), 1);
  assert_eq!(event.recorded_date, event.recorded_time.date());
  assert_eq!(clock::format_time(event.recorded_time), "2024-06-01 09:15:00");
}

#[tokio::test]
async fn sequence_ids_strictly_increase() {
  let s = store().await;
  s.upsert_roster(&[cruz()]).await.unwrap();

  let a = s.append_check_in("21-07343", at(2024, 6, 1, 8, 0, 0)).await.unwrap();
  let b = s.append_check_in("21-07343", at(2024, 6, 1, 8, 0, 1)).await.unwrap();
  let c = s.append_check_in("21-07343", at(2024, 6, 1, 8, 0, 2)).await.unwrap();
  assert!(a.sequence_id < b.sequence_id);
  assert!(b.sequence_id < c.sequence_id);
}

#[tokio::test]
async fn same_day_check_ins_are_not_deduplicated() {
  let s = store().await;
  s.upsert_roster(&[cruz()]).await.unwrap();

  s.append_check_in("21-07343", at(2024, 6, 1, 9, 0, 0)).await.unwrap();
  s.append_check_in("21-07343", at(2024, 6, 1, 9, 0, 0)).await.unwrap();
  assert_eq!(s.event_count().await.unwrap(), 2);
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn daily_log_filters_by_date_and_orders_newest_first() {
  let s = store().await;
  s.upsert_roster(&[cruz(), Person::new("22-00001", "Reyes, Ana")]).await.unwrap();

  s.append_check_in("21-07343", at(2024, 6, 1, 8, 30, 0)).await.unwrap();
  s.append_check_in("22-00001", at(2024, 6, 1, 14, 5, 9)).await.unwrap();
  s.append_check_in("21-07343", at(2024, 6, 2, 7, 0, 0)).await.unwrap();

  let day = s.daily_log(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).await.unwrap();
  assert_eq!(day.len(), 2);
  assert_eq!(day[0].identifier, "22-00001");
  assert_eq!(day[0].time_in, "02:05:09 PM");
  assert_eq!(day[1].identifier, "21-07343");
  assert_eq!(day[1].time_in, "08:30:00 AM");
}

#[tokio::test]
async fn daily_log_empty_for_quiet_date() {
  let s = store().await;
  s.upsert_roster(&[cruz()]).await.unwrap();
  s.append_check_in("21-07343", at(2024, 6, 1, 9, 0, 0)).await.unwrap();

  let day = s.daily_log(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()).await.unwrap();
  assert!(day.is_empty());
}

#[tokio::test]
async fn monthly_log_respects_calendar_bounds() {
  let s = store().await;
  s.upsert_roster(&[cruz()]).await.unwrap();

  s.append_check_in("21-07343", at(2024, 5, 31, 23, 59, 59)).await.unwrap();
  s.append_check_in("21-07343", at(2024, 6, 1, 0, 0, 0)).await.unwrap();
  s.append_check_in("21-07343", at(2024, 6, 30, 23, 59, 59)).await.unwrap();
  s.append_check_in("21-07343", at(2024, 7, 1, 0, 0, 0)).await.unwrap();

  let june = s.monthly_log(6, 2024).await.unwrap();
  assert_eq!(june.len(), 2);
  // Newest first.
  assert_eq!(june[0].date, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
  assert_eq!(june[1].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
}

#[tokio::test]
async fn monthly_log_december_rolls_into_next_year() {
  let s = store().await;
  s.upsert_roster(&[cruz()]).await.unwrap();

  s.append_check_in("21-07343", at(2024, 12, 31, 23, 0, 0)).await.unwrap();
  s.append_check_in("21-07343", at(2025, 1, 1, 1, 0, 0)).await.unwrap();

  let december = s.monthly_log(12, 2024).await.unwrap();
  assert_eq!(december.len(), 1);
  assert_eq!(december[0].date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
}

#[tokio::test]
async fn monthly_log_rejects_impossible_month() {
  let s = store().await;
  assert!(matches!(
    s.monthly_log(13, 2024).await,
    Err(Error::Core(rollcall_core::Error::BadMonth(13)))
  ));
}

// ─── Access gate and purge ───────────────────────────────────────────────────

#[tokio::test]
async fn default_admin_credentials_are_seeded() {
  let s = store().await;
  assert!(s.verify_admin("admin", "library123").await.unwrap());
  assert!(!s.verify_admin("admin", "wrong").await.unwrap());
  assert!(!s.verify_admin("root", "library123").await.unwrap());
}

#[tokio::test]
async fn purge_all_empties_roster_and_log() {
  let s = store().await;
  s.upsert_roster(&[cruz()]).await.unwrap();
  s.append_check_in("21-07343", at(2024, 6, 1, 9, 0, 0)).await.unwrap();

  s.purge_all().await.unwrap();

  assert_eq!(s.event_count().await.unwrap(), 0);
  assert_eq!(s.get_person("21-07343").await.unwrap(), None);
}

// ─── End-to-end flows over the trait ─────────────────────────────────────────

#[tokio::test]
async fn reference_scenario() {
  let s = store().await;
  s.upsert_roster(&[Person::new("21-07343", "Cruz, Mykel Aris B")]).await.unwrap();

  let receipt = checkin::check_in_at(&s, "21-07343", at(2024, 6, 1, 9, 15, 0))
    .await
    .unwrap();
  assert_eq!(receipt.full_name, "Cruz, Mykel Aris B");
  assert_eq!(clock::format_date(receipt.event.recorded_date), "2024-06-01");

  let day = s.daily_log(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).await.unwrap();
  assert_eq!(day.len(), 1);
  assert_eq!(day[0].identifier, "21-07343");

  let err = checkin::check_in_at(&s, "99-99999", at(2024, 6, 1, 9, 16, 0))
    .await
    .unwrap_err();
  assert!(matches!(err, checkin::CheckInError::UnknownIdentifier(_)));
  assert_eq!(s.event_count().await.unwrap(), 1);
}

#[tokio::test]
async fn imported_roster_file_round_trips_through_store() {
  let s = store().await;

  let text = "SR Code, Full Name, College, PROGRAM, Campus\n\
              21-07343,\"Cruz, Mykel Aris B\",CICS,BSIT,Alangilan\n\
              22-00001,\"Reyes, Ana\",CAS,BSPsych,Main\n";
  let parsed = roster::parse_roster(text).unwrap();
  s.upsert_roster(&parsed.people).await.unwrap();

  let exported = roster::export_roster(&parsed.people);
  let reparsed = roster::parse_roster(&exported).unwrap();
  assert_eq!(reparsed.people, parsed.people);

  for p in &reparsed.people {
    assert_eq!(s.get_person(&p.identifier).await.unwrap().as_ref(), Some(p));
  }
}
