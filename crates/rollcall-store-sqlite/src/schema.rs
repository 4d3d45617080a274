//! SQL schema for the embedded attendance store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The check-in log is strictly append-only: no UPDATE is ever issued against
/// `check_in_event`, and DELETE only through the offline purge. AUTOINCREMENT
/// keeps sequence ids strictly increasing and never reused, even after a
/// purge.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS person (
    identifier           TEXT PRIMARY KEY,
    full_name            TEXT NOT NULL,
    organizational_unit  TEXT,
    program              TEXT,
    site                 TEXT
);

CREATE TABLE IF NOT EXISTS check_in_event (
    sequence_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    identifier   TEXT NOT NULL REFERENCES person(identifier),
    time_in      TEXT NOT NULL,   -- 'YYYY-MM-DD HH:MM:SS', civil UTC+8
    date_in      TEXT NOT NULL    -- 'YYYY-MM-DD', date component of time_in
);

CREATE TABLE IF NOT EXISTS admin (
    username  TEXT PRIMARY KEY,
    password  TEXT NOT NULL       -- plain text; placeholder gate, see core docs
);

INSERT OR IGNORE INTO admin (username, password) VALUES ('admin', 'library123');

CREATE INDEX IF NOT EXISTS check_in_event_identifier_idx ON check_in_event(identifier);
CREATE INDEX IF NOT EXISTS check_in_event_date_idx       ON check_in_event(date_in);

PRAGMA user_version = 1;
";
