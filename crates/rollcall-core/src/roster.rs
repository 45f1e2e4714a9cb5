//! The `RosterClient` trait: the engine's view of the storage service.
//!
//! Implemented over HTTP by `rollcall-client`. The session engine depends on
//! this abstraction only, so tests can substitute an in-process fake.

use std::future::Future;

use crate::{entry::AttendanceEntry, student::Student};

/// Remote roster and attendance operations.
///
/// All methods return `Send` futures so the sync loop can run them on a
/// spawned tokio task.
pub trait RosterClient: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up a student by id. `Ok(None)` means the backend answered but has
  /// no such student.
  fn get_student(
    &self,
    student_id: &str,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send;

  /// Every attendance record the backend holds, in no particular order.
  fn list_attendance(
    &self,
  ) -> impl Future<Output = Result<Vec<AttendanceEntry>, Self::Error>> + Send;

  /// Persist one attendance record. Resolves once the backend acknowledged.
  fn append_attendance(
    &self,
    entry: &AttendanceEntry,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;

  /// Delete every attendance record of `section`.
  fn delete_section_attendance(
    &self,
    section: &str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
