//! Error type for `rollcall-sheet`.

use rollcall_core::export::ExportFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("zip error: {0}")]
  Zip(#[from] zip::result::ZipError),

  #[error("xml error: {0}")]
  Xml(String),

  #[error("{0} export is not handled by this sink")]
  UnsupportedFormat(ExportFormat),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
