//! In-process stand-ins for the backend, the export sink and the UI.

use std::{
  collections::{HashMap, HashSet},
  sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
  },
};

use chrono::{DateTime, TimeZone, Utc};
use rollcall_core::{
  entry::AttendanceEntry,
  export::{ExportFormat, ExportReceipt, ExportSink, ExportSnapshot},
  roster::RosterClient,
  student::Student,
};
use thiserror::Error;
use tokio::sync::Notify;

use crate::ui::{Notice, Notifier, Renderer, Scanner};

#[derive(Debug, Error)]
#[error("fake failure: {0}")]
pub struct FakeError(pub &'static str);

pub fn noon() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 9, 2, 12, 0, 0).unwrap() }

pub fn next_day_noon() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 9, 3, 12, 0, 0).unwrap()
}

pub fn student(id: &str, section: &str) -> Student {
  Student {
    student_id: id.into(),
    name:       format!("Student {id}"),
    course:     "BSIT".into(),
    section:    section.into(),
  }
}

pub fn entry(id: &str, section: &str, time_in: DateTime<Utc>) -> AttendanceEntry {
  AttendanceEntry::new(&student(id, section), section, "IPT 101", time_in)
}

// ─── Roster ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeRoster {
  pub students:       Mutex<HashMap<String, Student>>,
  pub attendance:     Mutex<Vec<AttendanceEntry>>,
  pub lookups:        AtomicUsize,
  pub appends:        AtomicUsize,
  pub lists:          AtomicUsize,
  pub deletes:        Mutex<Vec<String>>,
  pub fail_lookup:    AtomicBool,
  pub fail_list:      AtomicBool,
  pub fail_append:    AtomicBool,
  pub fail_delete_of: Mutex<HashSet<String>>,
  /// When set, `get_student` waits for a notification before answering.
  pub lookup_gate:    Mutex<Option<Arc<Notify>>>,
  /// When set, `list_attendance` reads the collection, then waits for a
  /// notification before answering with what it read.
  pub list_gate:      Mutex<Option<Arc<Notify>>>,
}

impl FakeRoster {
  pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
    let roster = Self::default();
    {
      let mut map = roster.students.lock().unwrap();
      for s in students {
        map.insert(s.student_id.clone(), s);
      }
    }
    roster
  }

  pub fn set_remote(&self, entries: Vec<AttendanceEntry>) {
    *self.attendance.lock().unwrap() = entries;
  }

  pub fn remote(&self) -> Vec<AttendanceEntry> { self.attendance.lock().unwrap().clone() }

  pub fn gate_lookups(&self) -> Arc<Notify> {
    let gate = Arc::new(Notify::new());
    *self.lookup_gate.lock().unwrap() = Some(Arc::clone(&gate));
    gate
  }

  pub fn gate_lists(&self) -> Arc<Notify> {
    let gate = Arc::new(Notify::new());
    *self.list_gate.lock().unwrap() = Some(Arc::clone(&gate));
    gate
  }

  /// Later listings answer immediately; one already waiting stays parked.
  pub fn ungate_lists(&self) { *self.list_gate.lock().unwrap() = None; }
}

impl RosterClient for FakeRoster {
  type Error = FakeError;

  async fn get_student(&self, student_id: &str) -> Result<Option<Student>, FakeError> {
    self.lookups.fetch_add(1, Ordering::SeqCst);
    let gate = self.lookup_gate.lock().unwrap().clone();
    if let Some(gate) = gate {
      gate.notified().await;
    }
    if self.fail_lookup.load(Ordering::SeqCst) {
      return Err(FakeError("lookup"));
    }
    Ok(self.students.lock().unwrap().get(student_id).cloned())
  }

  async fn list_attendance(&self) -> Result<Vec<AttendanceEntry>, FakeError> {
    self.lists.fetch_add(1, Ordering::SeqCst);
    if self.fail_list.load(Ordering::SeqCst) {
      return Err(FakeError("list"));
    }
    let listed = self.remote();
    let gate = self.list_gate.lock().unwrap().clone();
    if let Some(gate) = gate {
      gate.notified().await;
    }
    Ok(listed)
  }

  async fn append_attendance(&self, entry: &AttendanceEntry) -> Result<(), FakeError> {
    self.appends.fetch_add(1, Ordering::SeqCst);
    if self.fail_append.load(Ordering::SeqCst) {
      return Err(FakeError("append"));
    }
    self.attendance.lock().unwrap().push(entry.clone());
    Ok(())
  }

  async fn delete_section_attendance(&self, section: &str) -> Result<(), FakeError> {
    self.deletes.lock().unwrap().push(section.to_owned());
    if self.fail_delete_of.lock().unwrap().contains(section) {
      return Err(FakeError("delete"));
    }
    self.attendance.lock().unwrap().retain(|e| e.section != section);
    Ok(())
  }
}

// ─── Export sink ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeSink {
  pub fail:    AtomicBool,
  pub exports: Mutex<Vec<(ExportFormat, ExportSnapshot)>>,
}

impl ExportSink for FakeSink {
  type Error = FakeError;

  async fn export(
    &self,
    format: ExportFormat,
    snapshot: &ExportSnapshot,
  ) -> Result<ExportReceipt, FakeError> {
    if self.fail.load(Ordering::SeqCst) {
      return Err(FakeError("export"));
    }
    self.exports.lock().unwrap().push((format, snapshot.clone()));
    Ok(ExportReceipt {
      format,
      location: format!("memory://{format}"),
      rows: snapshot.entries.len(),
    })
  }
}

// ─── Frontend ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
  Pause,
  Resume,
  Notify(Notice),
  Render(usize),
}

#[derive(Default)]
pub struct RecordingFrontend {
  pub events: Mutex<Vec<UiEvent>>,
}

impl RecordingFrontend {
  pub fn events(&self) -> Vec<UiEvent> { self.events.lock().unwrap().clone() }

  pub fn renders(&self) -> usize {
    self
      .events()
      .iter()
      .filter(|e| matches!(e, UiEvent::Render(_)))
      .count()
  }
}

impl Scanner for RecordingFrontend {
  fn pause(&self) { self.events.lock().unwrap().push(UiEvent::Pause); }

  fn resume(&self) { self.events.lock().unwrap().push(UiEvent::Resume); }
}

impl Notifier for RecordingFrontend {
  async fn notify(&self, notice: &Notice) {
    self.events.lock().unwrap().push(UiEvent::Notify(notice.clone()));
  }
}

impl Renderer for RecordingFrontend {
  fn render(&self, entries: &[AttendanceEntry]) {
    self.events.lock().unwrap().push(UiEvent::Render(entries.len()));
  }
}
