//! Row types and conversions between SQLite columns and domain types.
//!
//! Timestamps are stored as RFC 3339 strings with millisecond precision.

use chrono::{DateTime, SecondsFormat, Utc};
use rollcall_core::{entry::AttendanceEntry, student::Student};

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Millis, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn student_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Student> {
  Ok(Student {
    student_id: row.get(0)?,
    name:       row.get(1)?,
    course:     row.get(2)?,
    section:    row.get(3)?,
  })
}

/// An `attendance` row before its timestamp is parsed.
pub struct RawEntry {
  pub record_id:  String,
  pub student_id: String,
  pub name:       String,
  pub course:     String,
  pub section:    String,
  pub time_in:    String,
  pub subject:    String,
}

impl RawEntry {
  pub const COLUMNS: &'static str =
    "record_id, student_id, name, course, section, time_in, subject";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_id:  row.get(0)?,
      student_id: row.get(1)?,
      name:       row.get(2)?,
      course:     row.get(3)?,
      section:    row.get(4)?,
      time_in:    row.get(5)?,
      subject:    row.get(6)?,
    })
  }

  pub fn into_entry(self) -> Result<(String, AttendanceEntry)> {
    let entry = AttendanceEntry {
      student_id: self.student_id,
      name:       self.name,
      course:     self.course,
      section:    self.section,
      time_in:    decode_dt(&self.time_in)?,
      subject:    self.subject,
    };
    Ok((self.record_id, entry))
  }
}
