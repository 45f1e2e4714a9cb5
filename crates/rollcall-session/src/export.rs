//! Export-then-purge.
//!
//! The backend is only purged after the export sink confirmed a durable
//! write. While an export is in progress the session's write gate is held, so
//! no scan can commit a record that the purge would delete unexported. The
//! snapshot is taken from a fresh listing rather than the cached ledger, so
//! records another client appended since the last sync are exported too.

use std::sync::Arc;

use chrono::Local;
use rollcall_core::{
  export::{ExportFormat, ExportReceipt, ExportSink, ExportSnapshot},
  roster::RosterClient,
};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::{
  error::ExportError,
  state::{Clock, SharedState},
  ui::Renderer,
};

pub struct ExportCoordinator<R, S, F> {
  roster:   Arc<R>,
  sink:     Arc<S>,
  frontend: Arc<F>,
  state:    SharedState,
  permit:   Arc<Semaphore>,
  clock:    Clock,
}

impl<R, S, F> ExportCoordinator<R, S, F>
where
  R: RosterClient,
  S: ExportSink,
  F: Renderer,
{
  pub fn new(
    roster: Arc<R>,
    sink: Arc<S>,
    frontend: Arc<F>,
    state: SharedState,
    permit: Arc<Semaphore>,
    clock: Clock,
  ) -> Self {
    Self { roster, sink, frontend, state, permit, clock }
  }

  /// Freeze what the purge is about to delete: a fresh backend listing
  /// merged with the ledger, scoped to the active sections, one row per
  /// student per day, most recent first.
  ///
  /// Callers hold the write gate, so no scan commits between this listing
  /// and the purge.
  pub async fn snapshot(&self) -> Result<ExportSnapshot, ExportError> {
    if self.state.lock().sections().is_empty() {
      return Err(ExportError::NoSectionConfigured);
    }

    let remote = self
      .roster
      .list_attendance()
      .await
      .map_err(|e| ExportError::ExportFailed(e.to_string()))?;
    let fetched = remote.len();

    let state = self.state.lock();
    if state.sections().is_empty() {
      return Err(ExportError::NoSectionConfigured);
    }
    let merged = remote.into_iter().chain(state.ledger.snapshot());
    let entries = state.ledger.materialize(merged, &Local);
    debug!(fetched, rows = entries.len(), "export snapshot taken");
    Ok(ExportSnapshot {
      subject:  state.descriptor.subject.clone(),
      sections: state.sections().clone(),
      taken_at: (self.clock)(),
      entries,
    })
  }

  /// Export the active sections' attendance as `format`, then delete those
  /// sections from the backend and clear the ledger.
  ///
  /// If the listing or the export fails nothing is deleted and the ledger is
  /// untouched. If the export succeeds every active section is purged
  /// (failures are collected into [`ExportError::PurgeFailed`]) and the
  /// ledger is cleared.
  pub async fn export_and_purge(
    &self,
    format: ExportFormat,
  ) -> Result<ExportReceipt, ExportError> {
    let _gate = self
      .permit
      .acquire()
      .await
      .map_err(|e| ExportError::ExportFailed(e.to_string()))?;

    let snapshot = self.snapshot().await?;
    let receipt = self
      .sink
      .export(format, &snapshot)
      .await
      .map_err(|e| ExportError::ExportFailed(e.to_string()))?;
    info!(
      %format,
      location = %receipt.location,
      rows = receipt.rows,
      "attendance exported"
    );

    let mut failed = Vec::new();
    for section in snapshot.sections.iter() {
      match self.roster.delete_section_attendance(section).await {
        Ok(()) => info!(section, "purged exported attendance"),
        Err(e) => {
          warn!(section, error = %e, "failed to purge exported attendance");
          failed.push(section.to_owned());
        }
      }
    }

    let rows = {
      let mut state = self.state.lock();
      state.ledger.clear();
      state.ledger.snapshot()
    };
    self.frontend.render(&rows);

    if failed.is_empty() {
      Ok(receipt)
    } else {
      Err(ExportError::PurgeFailed { receipt, sections: failed })
    }
  }
}
