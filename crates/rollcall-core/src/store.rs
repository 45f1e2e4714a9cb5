//! The `AttendanceStore` trait: the backend's persistence abstraction.
//!
//! This is the server side of the roster service: `rollcall-api` exposes any
//! implementation over HTTP, and `rollcall-store-sqlite` provides one.

use std::{collections::BTreeMap, future::Future};

use crate::{entry::AttendanceEntry, student::Student};

/// Backend storage for the roster and the attendance collection.
///
/// Attendance records are keyed by a store-assigned record id; the engine
/// only ever uses the values.
pub trait AttendanceStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Roster ────────────────────────────────────────────────────────────

  /// Retrieve a student by id. Returns `None` if not found.
  fn get_student<'a>(
    &'a self,
    student_id: &'a str,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + 'a;

  /// Insert or replace a roster entry.
  fn put_student(
    &self,
    student: Student,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Attendance ────────────────────────────────────────────────────────

  /// The whole attendance collection, keyed by record id.
  fn list_attendance(
    &self,
  ) -> impl Future<Output = Result<BTreeMap<String, AttendanceEntry>, Self::Error>> + Send + '_;

  /// Append a record and return its new record id.
  fn append_attendance(
    &self,
    entry: AttendanceEntry,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  /// Delete every record whose section is `section`; returns how many went.
  fn delete_section_attendance<'a>(
    &'a self,
    section: &'a str,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}
