//! Errors surfaced by the session engine.
//!
//! Scan errors are shown to the user before they are returned. Sync errors
//! only reach the log.

use rollcall_core::export::ExportReceipt;
use thiserror::Error;

/// Why a scan did not produce an attendance entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
  /// Another scan is still being processed; this one was ignored.
  #[error("a scan is already being processed")]
  Busy,

  #[error("please set the section first")]
  NoSectionConfigured,

  #[error("student {0:?} not found")]
  StudentNotFound(String),

  #[error("student {student_id} does not belong to section {sections}")]
  SectionMismatch {
    student_id: String,
    sections:   String,
  },

  #[error("attendance for student {0} is already recorded for today")]
  DuplicateAttendance(String),

  #[error("failed to save attendance: {0}")]
  CommitFailed(String),
}

/// A failed sync tick. Logged by the loop, never fatal to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
  #[error("failed to fetch attendance: {0}")]
  FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
  #[error("please set the section first")]
  NoSectionConfigured,

  /// The export write failed; nothing was purged.
  #[error("export failed: {0}")]
  ExportFailed(String),

  /// The export succeeded but deleting some sections' records failed.
  #[error("exported to {}, but purging sections {sections:?} failed", receipt.location)]
  PurgeFailed {
    receipt:  ExportReceipt,
    sections: Vec<String>,
  },
}
