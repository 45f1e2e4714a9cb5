//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use rollcall_core::{entry::AttendanceEntry, store::AttendanceStore, student::Student};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn student(id: &str, section: &str) -> Student {
  Student {
    student_id: id.into(),
    name:       format!("Student {id}"),
    course:     "BSIT".into(),
    section:    section.into(),
  }
}

fn entry(id: &str, section: &str) -> AttendanceEntry {
  let at = Utc.with_ymd_and_hms(2024, 9, 2, 8, 5, 9).unwrap()
    + chrono::Duration::milliseconds(250);
  AttendanceEntry::new(&student(id, section), section, "IPT 101", at)
}

// ─── Roster ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_and_get_student() {
  let s = store().await;
  let ana = student("2021-0001", "A, B");

  s.put_student(ana.clone()).await.unwrap();

  assert_eq!(s.get_student("2021-0001").await.unwrap(), Some(ana));
}

#[tokio::test]
async fn get_student_missing_returns_none() {
  let s = store().await;
  assert!(s.get_student("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn put_student_replaces_existing_row() {
  let s = store().await;
  s.put_student(student("1", "A")).await.unwrap();

  let mut moved = student("1", "C");
  moved.name = "Renamed".into();
  s.put_student(moved.clone()).await.unwrap();

  assert_eq!(s.get_student("1").await.unwrap(), Some(moved));
}

// ─── Attendance ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_lists_nothing() {
  let s = store().await;
  assert!(s.list_attendance().await.unwrap().is_empty());
}

#[tokio::test]
async fn appended_records_are_keyed_by_their_ids() {
  let s = store().await;
  let first = s.append_attendance(entry("1", "A")).await.unwrap();
  let second = s.append_attendance(entry("2", "B")).await.unwrap();
  assert_ne!(first, second);

  let all = s.list_attendance().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[&first].student_id, "1");
  assert_eq!(all[&second].section, "B");
}

#[tokio::test]
async fn time_in_survives_storage_with_millis() {
  let s = store().await;
  let e = entry("1", "A");
  let id = s.append_attendance(e.clone()).await.unwrap();

  let all = s.list_attendance().await.unwrap();
  assert_eq!(all[&id], e);
}

#[tokio::test]
async fn delete_removes_only_the_named_section() {
  let s = store().await;
  s.append_attendance(entry("1", "A")).await.unwrap();
  s.append_attendance(entry("2", "A")).await.unwrap();
  s.append_attendance(entry("3", "B")).await.unwrap();

  assert_eq!(s.delete_section_attendance("A").await.unwrap(), 2);

  let left: Vec<_> = s.list_attendance().await.unwrap().into_values().collect();
  assert_eq!(left.len(), 1);
  assert_eq!(left[0].student_id, "3");
}

#[tokio::test]
async fn deleting_an_unknown_section_is_not_an_error() {
  let s = store().await;
  s.append_attendance(entry("1", "A")).await.unwrap();

  assert_eq!(s.delete_section_attendance("Z").await.unwrap(), 0);
  assert_eq!(s.list_attendance().await.unwrap().len(), 1);
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("rollcall.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.put_student(student("1", "A")).await.unwrap();
    s.append_attendance(entry("1", "A")).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.get_student("1").await.unwrap().is_some());
  assert_eq!(s.list_attendance().await.unwrap().len(), 1);
}
