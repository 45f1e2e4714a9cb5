//! Periodic reconciliation of the ledger with the backend.

use std::{
  sync::{Arc, Mutex, PoisonError},
  time::Duration,
};

use chrono::Local;
use rollcall_core::roster::RosterClient;
use tokio::{
  task::JoinHandle,
  time::{MissedTickBehavior, interval},
};
use tracing::{debug, info, warn};

use crate::{error::SyncError, state::SharedState, ui::Renderer};

/// Default polling period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

// ─── Reconciler ──────────────────────────────────────────────────────────────

/// One sync tick's worth of work; cloned into the polling task.
pub struct Reconciler<R, F> {
  roster:   Arc<R>,
  frontend: Arc<F>,
  state:    SharedState,
}

impl<R, F> Clone for Reconciler<R, F> {
  fn clone(&self) -> Self {
    Self {
      roster:   Arc::clone(&self.roster),
      frontend: Arc::clone(&self.frontend),
      state:    self.state.clone(),
    }
  }
}

impl<R, F> Reconciler<R, F>
where
  R: RosterClient,
  F: Renderer,
{
  pub fn new(roster: Arc<R>, frontend: Arc<F>, state: SharedState) -> Self {
    Self { roster, frontend, state }
  }

  /// Fetch the backend collection and adopt it if it differs from the ledger.
  ///
  /// A result is discarded if the ledger moved while the fetch was in flight
  /// (a scan committed, an export purged, the sections changed).
  ///
  /// Returns `Ok(true)` if the ledger changed (and was re-rendered).
  pub async fn tick(&self) -> Result<bool, SyncError> {
    let (sections, generation) = {
      let state = self.state.lock();
      (state.sections().clone(), state.ledger.generation())
    };
    if sections.is_empty() {
      return Ok(false);
    }

    let remote = self
      .roster
      .list_attendance()
      .await
      .map_err(|e| SyncError::FetchFailed(e.to_string()))?;
    let fetched = remote.len();

    let rows = {
      let mut state = self.state.lock();
      if *state.sections() != sections || state.ledger.generation() != generation {
        debug!("ledger changed during fetch; discarding stale result");
        return Ok(false);
      }
      let materialized = state.ledger.materialize(remote, &Local);
      state
        .ledger
        .replace_if_changed(materialized)
        .then(|| state.ledger.snapshot())
    };

    match rows {
      Some(rows) => {
        debug!(fetched, kept = rows.len(), "ledger updated from backend");
        self.frontend.render(&rows);
        Ok(true)
      }
      None => Ok(false),
    }
  }
}

// ─── Loop ────────────────────────────────────────────────────────────────────

/// Owns the (at most one) polling task of a session.
///
/// The task is aborted on [`SyncLoop::stop`], on [`SyncLoop::restart`], and
/// when the loop is dropped.
pub struct SyncLoop<R, F> {
  reconciler: Reconciler<R, F>,
  period:     Duration,
  task:       Mutex<Option<JoinHandle<()>>>,
}

impl<R, F> SyncLoop<R, F>
where
  R: RosterClient + 'static,
  F: Renderer + 'static,
{
  pub fn new(reconciler: Reconciler<R, F>, period: Duration) -> Self {
    Self { reconciler, period, task: Mutex::new(None) }
  }

  pub fn reconciler(&self) -> &Reconciler<R, F> { &self.reconciler }

  /// Cancel any running task and, if a section is configured, start polling
  /// against the current section set. The first tick runs immediately.
  ///
  /// Must be called from within a tokio runtime.
  pub fn restart(&self) {
    let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(old) = task.take() {
      old.abort();
    }

    let sections = self.reconciler.state.lock().sections().clone();
    if sections.is_empty() {
      debug!("no section configured; sync loop idle");
      return;
    }

    info!(%sections, period_ms = self.period.as_millis() as u64, "starting attendance sync");
    let reconciler = self.reconciler.clone();
    let period = self.period;
    *task = Some(tokio::spawn(async move {
      let mut ticker = interval(period);
      ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
      loop {
        ticker.tick().await;
        if let Err(e) = reconciler.tick().await {
          warn!(error = %e, "attendance sync tick failed");
        }
      }
    }));
  }

  /// Cancel the polling task, if any.
  pub fn stop(&self) {
    let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(old) = task.take() {
      debug!("stopping attendance sync");
      old.abort();
    }
  }

  pub fn is_running(&self) -> bool {
    self
      .task
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .as_ref()
      .is_some_and(|t| !t.is_finished())
  }
}

impl<R, F> Drop for SyncLoop<R, F> {
  fn drop(&mut self) {
    let task = self.task.get_mut().unwrap_or_else(PoisonError::into_inner);
    if let Some(old) = task.take() {
      old.abort();
    }
  }
}
