//! [`AttendanceSession`]: one activation of a subject and section set.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use rollcall_core::{
  entry::AttendanceEntry,
  export::{ExportFormat, ExportReceipt, ExportSink},
  roster::RosterClient,
  session::{QrPayload, SectionEncoding, SessionDescriptor},
};
use tokio::sync::Semaphore;
use tracing::info;

use crate::{
  error::{ExportError, ScanError, SyncError},
  export::ExportCoordinator,
  scan::ScanProcessor,
  state::{Clock, SharedState},
  sync::{DEFAULT_POLL_INTERVAL, Reconciler, SyncLoop},
  ui::Frontend,
};

/// Tunables for a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
  pub poll_interval:    Duration,
  pub section_encoding: SectionEncoding,
  pub clock:            Clock,
}

impl Default for SessionConfig {
  fn default() -> Self {
    Self {
      poll_interval:    DEFAULT_POLL_INTERVAL,
      section_encoding: SectionEncoding::default(),
      clock:            Utc::now,
    }
  }
}

/// The session-state object: descriptor, ledger, and the components that
/// write to the ledger.
///
/// Activating a session starts its sync loop; dropping it (or calling
/// [`AttendanceSession::shutdown`]) stops the loop.
pub struct AttendanceSession<R, S, F> {
  state:    SharedState,
  config:   SessionConfig,
  frontend: Arc<F>,
  scans:    ScanProcessor<R, F>,
  sync:     SyncLoop<R, F>,
  exports:  ExportCoordinator<R, S, F>,
}

impl<R, S, F> AttendanceSession<R, S, F>
where
  R: RosterClient + 'static,
  S: ExportSink,
  F: Frontend + 'static,
{
  /// Build the session for `descriptor` and start syncing if it has
  /// sections. Must be called from within a tokio runtime.
  pub fn activate(
    roster: Arc<R>,
    sink: Arc<S>,
    frontend: Arc<F>,
    descriptor: SessionDescriptor,
    config: SessionConfig,
  ) -> Self {
    info!(subject = %descriptor.subject, sections = %descriptor.sections, "activating session");
    let state = SharedState::new(descriptor);
    let gate = Arc::new(Semaphore::new(1));

    let scans = ScanProcessor::new(
      Arc::clone(&roster),
      Arc::clone(&frontend),
      state.clone(),
      Arc::clone(&gate),
      config.clock,
    );
    let sync = SyncLoop::new(
      Reconciler::new(Arc::clone(&roster), Arc::clone(&frontend), state.clone()),
      config.poll_interval,
    );
    let exports = ExportCoordinator::new(
      roster,
      sink,
      Arc::clone(&frontend),
      state.clone(),
      gate,
      config.clock,
    );

    let session = Self { state, config, frontend, scans, sync, exports };
    session.sync.restart();
    session
  }

  pub fn descriptor(&self) -> SessionDescriptor { self.state.lock().descriptor.clone() }

  /// The current ledger contents, most recent first.
  pub fn entries(&self) -> Vec<AttendanceEntry> { self.state.lock().ledger.snapshot() }

  pub fn qr_payload(&self) -> rollcall_core::Result<QrPayload> {
    self.descriptor().encode(self.config.section_encoding)
  }

  pub fn is_syncing(&self) -> bool { self.sync.is_running() }

  /// Replace the descriptor (the instructor edited subject or sections).
  ///
  /// A section change rescopes the ledger, re-renders it, and restarts the
  /// sync loop against the new set.
  pub fn supersede(&self, descriptor: SessionDescriptor) {
    let rows = {
      let mut state = self.state.lock();
      state.supersede(descriptor).then(|| state.ledger.snapshot())
    };
    if let Some(rows) = rows {
      info!("section set changed; restarting sync");
      self.frontend.render(&rows);
      self.sync.restart();
    }
  }

  /// See [`ScanProcessor::process`].
  pub async fn scan(&self, student_id: &str) -> Result<AttendanceEntry, ScanError> {
    self.scans.process(student_id).await
  }

  /// Run one sync tick now, outside the polling schedule.
  pub async fn sync_now(&self) -> Result<bool, SyncError> {
    self.sync.reconciler().tick().await
  }

  /// See [`ExportCoordinator::export_and_purge`].
  pub async fn export_and_purge(
    &self,
    format: ExportFormat,
  ) -> Result<ExportReceipt, ExportError> {
    self.exports.export_and_purge(format).await
  }

  /// Stop background work. Also happens on drop.
  pub fn shutdown(&self) {
    info!("shutting down session");
    self.sync.stop();
  }
}
