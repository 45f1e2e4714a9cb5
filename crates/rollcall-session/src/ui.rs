//! Presentation capabilities the engine drives but does not implement.

use std::future::Future;

use rollcall_core::entry::AttendanceEntry;

/// The scan source (camera feed, stdin, ...). Frames arriving while paused
/// are discarded by the implementation.
pub trait Scanner: Send + Sync {
  fn pause(&self);
  fn resume(&self);
}

/// What the user is told after a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
  Recorded(AttendanceEntry),
  Rejected(String),
}

/// A blocking user-facing message (the "modal").
pub trait Notifier: Send + Sync {
  /// Show `notice`; resolves once the user dismissed it.
  fn notify<'a>(&'a self, notice: &'a Notice) -> impl Future<Output = ()> + Send + 'a;
}

/// Draws the attendance table. Always handed the full ledger, most recent
/// first.
pub trait Renderer: Send + Sync {
  fn render(&self, entries: &[AttendanceEntry]);
}

/// Everything a session needs from the presentation layer.
pub trait Frontend: Scanner + Notifier + Renderer {}

impl<T: Scanner + Notifier + Renderer> Frontend for T {}

/// Keeps the scanner paused for as long as it lives.
pub(crate) struct Paused<'a, S: Scanner + ?Sized>(&'a S);

impl<'a, S: Scanner + ?Sized> Paused<'a, S> {
  pub(crate) fn new(scanner: &'a S) -> Self {
    scanner.pause();
    Self(scanner)
  }
}

impl<S: Scanner + ?Sized> Drop for Paused<'_, S> {
  fn drop(&mut self) { self.0.resume(); }
}
