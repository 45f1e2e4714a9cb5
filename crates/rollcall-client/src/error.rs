//! Error type for `rollcall-client`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid base url {0:?}")]
  InvalidBaseUrl(String),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("{method} {path} → {status}")]
  Status {
    method: &'static str,
    path:   String,
    status: StatusCode,
  },

  #[error("remote sheet export needs a spreadsheet id")]
  MissingSpreadsheetId,

  #[error(transparent)]
  Sheet(#[from] rollcall_sheet::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
