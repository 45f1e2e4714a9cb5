//! Routes each export format to the sink that can write it.

use rollcall_core::export::{ExportFormat, ExportReceipt, ExportSink, ExportSnapshot};
use rollcall_sheet::FileSink;

use crate::{
  client::HttpRosterClient,
  error::{Error, Result},
};

/// Local files for XLSX and CSV, the roster service for remote sheets.
#[derive(Debug, Clone)]
pub struct Exporter {
  files:  FileSink,
  remote: HttpRosterClient,
}

impl Exporter {
  pub fn new(files: FileSink, remote: HttpRosterClient) -> Self { Self { files, remote } }
}

impl ExportSink for Exporter {
  type Error = Error;

  async fn export(
    &self,
    format: ExportFormat,
    snapshot: &ExportSnapshot,
  ) -> Result<ExportReceipt> {
    match format {
      ExportFormat::GoogleSheet => self.remote.export(format, snapshot).await,
      ExportFormat::Excel | ExportFormat::Csv => Ok(self.files.export(format, snapshot).await?),
    }
  }
}
