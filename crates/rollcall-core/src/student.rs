//! Student roster records, as served by the backend.

use serde::{Deserialize, Deserializer, Serialize};

use crate::section::{SectionSet, parse_sections};

/// A roster entry. Read-only from the engine's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
  pub student_id: String,
  pub name:       String,
  pub course:     String,
  /// One section name or a comma-joined list of them.
  #[serde(deserialize_with = "section_string_or_list")]
  pub section:    String,
}

impl Student {
  /// The sections this student belongs to.
  pub fn sections(&self) -> SectionSet { parse_sections(&self.section) }
}

/// Accept `"A, B"` as well as `["A", "B"]`.
fn section_string_or_list<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    One(String),
    Many(Vec<String>),
  }

  Ok(match Raw::deserialize(de)? {
    Raw::One(s) => s,
    Raw::Many(v) => v.join(","),
  })
}
