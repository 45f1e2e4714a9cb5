//! The tabular layout shared by every export format.

use chrono::{DateTime, TimeZone, Utc};
use rollcall_core::export::{ExportFormat, ExportSnapshot};

/// Column headers of the attendance table.
pub const COLUMNS: [&str; 5] = ["Student ID", "Name", "Course", "Section", "Time-in"];

pub const TITLE: &str = "ATTENDANCE RECORD FOR";

// ─── Date formatting ──────────────────────────────────────────────────────────

/// `9/2/2024`
pub fn format_date<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  at.with_timezone(tz).format("%-m/%-d/%Y").to_string()
}

/// `8:05:09 AM`
pub fn format_time<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  at.with_timezone(tz).format("%-I:%M:%S %p").to_string()
}

/// `9/2/2024, 8:05:09 AM`
pub fn format_time_in<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  format!("{}, {}", format_date(at, tz), format_time(at, tz))
}

/// `Attendance_9-2-2024.xlsx` for a snapshot taken on 2024-09-02.
pub fn file_name<Tz: TimeZone>(snapshot: &ExportSnapshot, format: ExportFormat, tz: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  let date = format_date(snapshot.taken_at, tz).replace('/', "-");
  let ext = match format {
    ExportFormat::Excel => "xlsx",
    ExportFormat::Csv | ExportFormat::GoogleSheet => "csv",
  };
  format!("Attendance_{date}.{ext}")
}

// ─── Sheet ────────────────────────────────────────────────────────────────────

/// A rectangular-ish grid of text cells. Rows may be shorter than the table
/// width (header rows are single cells).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
  pub rows:       Vec<Vec<String>>,
  /// Index of the column-header row within `rows`.
  pub header_row: usize,
}

impl Sheet {
  /// Lay out `snapshot`: title, date/time, subject/section, a blank row, the
  /// column headers, then one row per entry in snapshot order.
  pub fn build<Tz: TimeZone>(snapshot: &ExportSnapshot, tz: &Tz) -> Self
  where
    Tz::Offset: std::fmt::Display,
  {
    let mut rows = vec![
      vec![TITLE.to_owned()],
      vec![format!(
        "Date: {} Time: {}",
        format_date(snapshot.taken_at, tz),
        format_time(snapshot.taken_at, tz)
      )],
      vec![format!("Subject: {} Section: {}", snapshot.subject, snapshot.sections)],
      vec![String::new()],
    ];
    let header_row = rows.len();
    rows.push(COLUMNS.iter().map(|c| (*c).to_owned()).collect());

    rows.extend(snapshot.entries.iter().map(|e| {
      vec![
        e.student_id.clone(),
        e.name.clone(),
        e.course.clone(),
        e.section.clone(),
        format_time_in(e.time_in, tz),
      ]
    }));

    Self { rows, header_row }
  }

  pub fn width(&self) -> usize { self.rows.iter().map(Vec::len).max().unwrap_or(0) }

  /// Number of attendance rows (excluding the header block).
  pub fn data_rows(&self) -> usize { self.rows.len() - self.header_row - 1 }
}
