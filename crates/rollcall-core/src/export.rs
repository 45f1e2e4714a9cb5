//! Export formats, ledger snapshots, and the `ExportSink` trait.

use std::{fmt, future::Future, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{entry::AttendanceEntry, section::SectionSet};

/// Where (and as what) a ledger snapshot is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
  /// A local `.xlsx` workbook.
  Excel,
  /// A local `.csv` file.
  Csv,
  /// A new sheet in a remote spreadsheet.
  GoogleSheet,
}

impl ExportFormat {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Excel       => "xlsx",
      Self::Csv         => "csv",
      Self::GoogleSheet => "sheets",
    }
  }
}

impl fmt::Display for ExportFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl fmt::Display for UnknownFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "unknown export format {:?} (expected xlsx, csv or sheets)", self.0)
  }
}

impl std::error::Error for UnknownFormat {}

impl FromStr for ExportFormat {
  type Err = UnknownFormat;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "xlsx" | "excel" => Ok(Self::Excel),
      "csv" => Ok(Self::Csv),
      "sheets" | "google-sheet" | "google_sheet" | "gsheet" => Ok(Self::GoogleSheet),
      other => Err(UnknownFormat(other.to_owned())),
    }
  }
}

// ─── Snapshot / receipt ──────────────────────────────────────────────────────

/// A frozen copy of the ledger, handed to an [`ExportSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSnapshot {
  pub subject:  String,
  pub sections: SectionSet,
  /// When the snapshot was taken; drives the header date/time and file name.
  pub taken_at: DateTime<Utc>,
  /// Most recent first.
  pub entries:  Vec<AttendanceEntry>,
}

/// Proof of a durable export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReceipt {
  pub format:   ExportFormat,
  /// File path or spreadsheet URL.
  pub location: String,
  pub rows:     usize,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A capability that durably writes a snapshot somewhere.
///
/// A returned `Ok` is what licenses the coordinator to purge the backend, so
/// implementations must only resolve `Ok` once the write is complete.
pub trait ExportSink: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn export<'a>(
    &'a self,
    format: ExportFormat,
    snapshot: &'a ExportSnapshot,
  ) -> impl Future<Output = Result<ExportReceipt, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_user_facing_names() {
    assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
    assert_eq!(" csv ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
    assert_eq!("sheets".parse::<ExportFormat>().unwrap(), ExportFormat::GoogleSheet);
    assert!("pdf".parse::<ExportFormat>().is_err());
  }
}
