//! The attendance session engine.
//!
//! Ties a [`SessionDescriptor`](rollcall_core::session::SessionDescriptor) to
//! a [`Ledger`](rollcall_core::ledger::Ledger) and drives the three writers of
//! that ledger:
//!
//! - [`scan::ScanProcessor`] validates decoded student ids and commits entries;
//! - [`sync::SyncLoop`] periodically reconciles the ledger with the backend;
//! - [`export::ExportCoordinator`] exports the ledger and purges the backend.
//!
//! [`AttendanceSession`] owns all three for one activation of a section set.

pub mod error;
pub mod export;
pub mod scan;
pub mod session;
pub mod state;
pub mod sync;
pub mod ui;

pub use error::{ExportError, ScanError, SyncError};
pub use session::{AttendanceSession, SessionConfig};

#[cfg(test)]
mod fakes;
