//! The per-session mutable state shared by the scan, sync and export paths.
//!
//! Guarded by a `std::sync::Mutex` that is never held across an `.await`:
//! every read-modify-write of the ledger happens between suspension points.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use rollcall_core::{ledger::Ledger, section::SectionSet, session::SessionDescriptor};

/// Source of "now" for time-ins and export headers.
pub type Clock = fn() -> DateTime<Utc>;

/// The active descriptor and the ledger scoped to its sections.
#[derive(Debug)]
pub struct SessionState {
  pub descriptor: SessionDescriptor,
  pub ledger:     Ledger,
}

impl SessionState {
  pub fn new(descriptor: SessionDescriptor) -> Self {
    let ledger = Ledger::new(descriptor.sections.clone());
    Self { descriptor, ledger }
  }

  pub fn sections(&self) -> &SectionSet { &self.descriptor.sections }

  /// Replace the descriptor, rescoping the ledger if the sections changed.
  /// Returns `true` if the section set changed.
  pub fn supersede(&mut self, descriptor: SessionDescriptor) -> bool {
    let sections_changed = descriptor.sections != self.descriptor.sections;
    if sections_changed {
      self.ledger.rescope(descriptor.sections.clone());
    }
    self.descriptor = descriptor;
    sections_changed
  }
}

/// Cheaply clonable handle to a [`SessionState`].
#[derive(Debug, Clone)]
pub struct SharedState(Arc<Mutex<SessionState>>);

impl SharedState {
  pub fn new(descriptor: SessionDescriptor) -> Self {
    Self(Arc::new(Mutex::new(SessionState::new(descriptor))))
  }

  /// Lock the state. A panic in another holder does not leave the ledger in
  /// a torn state (every mutation is a single call), so poisoning is ignored.
  pub fn lock(&self) -> MutexGuard<'_, SessionState> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }
}
