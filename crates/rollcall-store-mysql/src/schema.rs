//! SQL schema for the client/server attendance store.
//!
//! MySQL rejects multi-statement batches on a default connection, so the DDL
//! is a list of single statements executed in order at startup. All are
//! idempotent.

/// Schema DDL, one statement per entry, executed in order.
///
/// `AUTO_INCREMENT` on an InnoDB table persists its counter (MySQL 8+), so
/// sequence ids stay strictly increasing and are not reused after a purge.
pub const SCHEMA: &[&str] = &[
  "CREATE TABLE IF NOT EXISTS person (
     identifier           VARCHAR(64)  NOT NULL,
     full_name            VARCHAR(255) NOT NULL,
     organizational_unit  VARCHAR(255) NULL,
     program              VARCHAR(255) NULL,
     site                 VARCHAR(255) NULL,
     PRIMARY KEY (identifier)
   ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
  "CREATE TABLE IF NOT EXISTS check_in_event (
     sequence_id  BIGINT      NOT NULL AUTO_INCREMENT,
     identifier   VARCHAR(64) NOT NULL,
     time_in      CHAR(19)    NOT NULL,
     date_in      CHAR(10)    NOT NULL,
     PRIMARY KEY (sequence_id),
     KEY check_in_event_identifier_idx (identifier),
     KEY check_in_event_date_idx (date_in),
     CONSTRAINT check_in_event_person_fk
       FOREIGN KEY (identifier) REFERENCES person (identifier)
   ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
  "CREATE TABLE IF NOT EXISTS admin (
     username  VARCHAR(64)  NOT NULL,
     password  VARCHAR(255) NOT NULL,
     PRIMARY KEY (username)
   ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
  "INSERT IGNORE INTO admin (username, password) VALUES ('admin', 'library123')",
];
