//! [`SqliteStore`]: the SQLite implementation of [`AttendanceStore`].

use std::{collections::BTreeMap, path::Path};

use rusqlite::OptionalExtension as _;
use tracing::debug;
use uuid::Uuid;

use rollcall_core::{entry::AttendanceEntry, store::AttendanceStore, student::Student};

use crate::{
  Result,
  encode::{RawEntry, encode_dt, student_from_row},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster and attendance store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── AttendanceStore impl ────────────────────────────────────────────────────

impl AttendanceStore for SqliteStore {
  type Error = crate::Error;

  // ── Roster ────────────────────────────────────────────────────────────────

  async fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
    let id = student_id.to_owned();

    let student = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT student_id, name, course, section FROM students WHERE student_id = ?1",
            rusqlite::params![id],
            student_from_row,
          )
          .optional()?)
      })
      .await?;

    Ok(student)
  }

  async fn put_student(&self, student: Student) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO students (student_id, name, course, section)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (student_id) DO UPDATE SET
             name    = excluded.name,
             course  = excluded.course,
             section = excluded.section",
          rusqlite::params![student.student_id, student.name, student.course, student.section],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Attendance ────────────────────────────────────────────────────────────

  async fn list_attendance(&self) -> Result<BTreeMap<String, AttendanceEntry>> {
    let raws: Vec<RawEntry> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {} FROM attendance", RawEntry::COLUMNS))?;
        let rows = stmt
          .query_map([], RawEntry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEntry::into_entry).collect()
  }

  async fn append_attendance(&self, entry: AttendanceEntry) -> Result<String> {
    let record_id = Uuid::new_v4().hyphenated().to_string();
    let id = record_id.clone();
    let time_in = encode_dt(entry.time_in);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO attendance ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            RawEntry::COLUMNS
          ),
          rusqlite::params![
            id,
            entry.student_id,
            entry.name,
            entry.course,
            entry.section,
            time_in,
            entry.subject,
          ],
        )?;
        Ok(())
      })
      .await?;

    debug!(%record_id, "attendance recorded");
    Ok(record_id)
  }

  async fn delete_section_attendance(&self, section: &str) -> Result<usize> {
    let section = section.to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM attendance WHERE section = ?1", rusqlite::params![section])?)
      })
      .await?;

    Ok(removed)
  }
}
