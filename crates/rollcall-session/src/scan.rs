//! Scan processing: decoded student id → validated, committed entry.

use std::sync::Arc;

use chrono::Local;
use rollcall_core::{entry::AttendanceEntry, roster::RosterClient, student::Student};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::{
  error::ScanError,
  state::{Clock, SharedState},
  ui::{Frontend, Notice, Paused},
};

/// Validates scans against the active session and the ledger, and commits
/// the accepted ones to the backend.
///
/// At most one scan is processed at a time. A scan arriving while another is
/// in flight returns [`ScanError::Busy`] without touching anything, which is
/// what keeps a camera that reads the same code on consecutive frames from
/// producing two entries.
pub struct ScanProcessor<R, F> {
  roster:   Arc<R>,
  frontend: Arc<F>,
  state:    SharedState,
  permit:   Arc<Semaphore>,
  clock:    Clock,
}

impl<R, F> ScanProcessor<R, F>
where
  R: RosterClient,
  F: Frontend,
{
  /// `permit` is the session's single-permit write gate, shared with the
  /// export coordinator.
  pub fn new(
    roster: Arc<R>,
    frontend: Arc<F>,
    state: SharedState,
    permit: Arc<Semaphore>,
    clock: Clock,
  ) -> Self {
    Self { roster, frontend, state, permit, clock }
  }

  /// Process one decoded student id.
  ///
  /// The outcome is shown to the user (with the scanner paused) before this
  /// returns; the gate is released only after the scanner resumed.
  pub async fn process(&self, student_id: &str) -> Result<AttendanceEntry, ScanError> {
    let Ok(_permit) = self.permit.try_acquire() else {
      debug!(student_id, "scan ignored: another scan is in flight");
      return Err(ScanError::Busy);
    };

    let outcome = self.validate_and_commit(student_id).await;
    let notice = match &outcome {
      Ok(entry) => {
        info!(student_id = %entry.student_id, section = %entry.section, "attendance recorded");
        Notice::Recorded(entry.clone())
      }
      Err(e) => {
        debug!(student_id, error = %e, "scan rejected");
        Notice::Rejected(e.to_string())
      }
    };

    let _paused = Paused::new(self.frontend.as_ref());
    self.frontend.notify(&notice).await;
    outcome
  }

  async fn validate_and_commit(&self, raw_id: &str) -> Result<AttendanceEntry, ScanError> {
    let (subject, sections) = {
      let state = self.state.lock();
      (state.descriptor.subject.clone(), state.sections().clone())
    };
    if sections.is_empty() {
      return Err(ScanError::NoSectionConfigured);
    }

    let student = self.lookup(raw_id.trim()).await?;

    let Some(section) = sections.first_shared(&student.sections()).map(str::to_owned) else {
      return Err(ScanError::SectionMismatch {
        student_id: student.student_id,
        sections:   sections.to_string(),
      });
    };

    let now = (self.clock)();
    let already = self
      .state
      .lock()
      .ledger
      .find_same_day(&student.student_id, now, &Local)
      .is_some();
    if already {
      return Err(ScanError::DuplicateAttendance(student.student_id));
    }

    let entry = AttendanceEntry::new(&student, &section, &subject, now);
    self
      .roster
      .append_attendance(&entry)
      .await
      .map_err(|e| ScanError::CommitFailed(e.to_string()))?;

    // A sync tick may have landed while the append was in flight and already
    // brought this entry in, or the sections may have moved on; either way
    // the ledger keeps its invariants and the next tick settles it.
    let rows = {
      let mut state = self.state.lock();
      match state.ledger.record(entry.clone(), &Local) {
        Ok(()) => Some(state.ledger.snapshot()),
        Err(e) => {
          debug!(error = %e, "committed entry not added locally");
          None
        }
      }
    };
    if let Some(rows) = rows {
      self.frontend.render(&rows);
    }

    Ok(entry)
  }

  async fn lookup(&self, student_id: &str) -> Result<Student, ScanError> {
    if student_id.is_empty() {
      return Err(ScanError::StudentNotFound(String::new()));
    }
    match self.roster.get_student(student_id).await {
      Ok(Some(student)) => Ok(student),
      Ok(None) => Err(ScanError::StudentNotFound(student_id.to_owned())),
      Err(e) => {
        warn!(student_id, error = %e, "student lookup failed");
        Err(ScanError::StudentNotFound(student_id.to_owned()))
      }
    }
  }
}
