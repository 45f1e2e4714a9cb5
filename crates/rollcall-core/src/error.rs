//! Error types for `rollcall-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("subject is required")]
  MissingSubject,

  #[error("at least one section is required")]
  NoSectionConfigured,

  #[error("entry section {0:?} is outside the active section set")]
  SectionOutOfScope(String),

  #[error("student {student_id} already has attendance on {day}")]
  DuplicateAttendance {
    student_id: String,
    day:        chrono::NaiveDate,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
