//! Person — one enrolled roster entry.

use serde::{Deserialize, Serialize};

/// A roster entry, keyed by its external identifier ("SR Code").
///
/// The identifier is immutable once assigned. The descriptive fields carry no
/// referential meaning; they exist only for display and export. Bulk import
/// applies insert-or-replace semantics: a re-imported identifier overwrites
/// the descriptive fields and keeps the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub identifier:          String,
  pub full_name:           String,
  pub organizational_unit: Option<String>,
  pub program:             Option<String>,
  pub site:                Option<String>,
}

impl Person {
  /// Convenience constructor used by tests and the CSV codec.
  pub fn new(identifier: impl Into<String>, full_name: impl Into<String>) -> Self {
    Self {
      identifier:          identifier.into(),
      full_name:           full_name.into(),
      organizational_unit: None,
      program:             None,
      site:                None,
    }
  }
}
