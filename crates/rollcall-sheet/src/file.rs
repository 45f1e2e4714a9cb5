//! Local-file export sink.

use std::path::PathBuf;

use chrono::Local;
use rollcall_core::export::{ExportFormat, ExportReceipt, ExportSink, ExportSnapshot};
use tracing::info;

use crate::{
  csv::to_csv,
  error::{Error, Result},
  table::{Sheet, file_name},
  xlsx::to_xlsx,
};

/// Writes `.xlsx` and `.csv` exports into a directory, creating it if
/// needed. An existing file of the same name is overwritten.
#[derive(Debug, Clone)]
pub struct FileSink {
  dir: PathBuf,
}

impl FileSink {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

  pub fn dir(&self) -> &std::path::Path { &self.dir }

  fn render(format: ExportFormat, snapshot: &ExportSnapshot) -> Result<Vec<u8>> {
    let sheet = Sheet::build(snapshot, &Local);
    match format {
      ExportFormat::Excel => to_xlsx(&sheet),
      ExportFormat::Csv => Ok(to_csv(&sheet).into_bytes()),
      ExportFormat::GoogleSheet => Err(Error::UnsupportedFormat(format)),
    }
  }
}

impl ExportSink for FileSink {
  type Error = Error;

  async fn export(
    &self,
    format: ExportFormat,
    snapshot: &ExportSnapshot,
  ) -> Result<ExportReceipt> {
    let bytes = Self::render(format, snapshot)?;
    let path = self.dir.join(file_name(snapshot, format, &Local));

    tokio::fs::create_dir_all(&self.dir).await?;
    tokio::fs::write(&path, &bytes).await?;
    info!(path = %path.display(), rows = snapshot.entries.len(), "wrote export");

    Ok(ExportReceipt {
      format,
      location: path.display().to_string(),
      rows: snapshot.entries.len(),
    })
  }
}
