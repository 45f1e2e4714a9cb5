//! HTTP client for the rollcall roster service.
//!
//! [`HttpRosterClient`] implements [`RosterClient`](rollcall_core::roster::RosterClient)
//! over the service's JSON API and writes remote sheets through
//! `POST /export-to-sheets`. [`Exporter`] pairs it with a local
//! [`FileSink`](rollcall_sheet::FileSink).

pub mod client;
pub mod error;
pub mod export;

pub use client::{ClientConfig, HttpRosterClient};
pub use error::{Error, Result};
pub use export::Exporter;
