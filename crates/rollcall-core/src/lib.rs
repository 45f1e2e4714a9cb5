//! Core types and trait definitions for rollcall.
//!
//! This crate is deliberately free of HTTP, database and runtime
//! dependencies. Every other crate in the workspace depends on it.

// Native `async fn` in traits; the traits spell out `Send` futures themselves.
#![allow(async_fn_in_trait)]

pub mod entry;
pub mod error;
pub mod export;
pub mod ledger;
pub mod roster;
pub mod section;
pub mod session;
pub mod store;
pub mod student;

pub use error::{Error, Result};
