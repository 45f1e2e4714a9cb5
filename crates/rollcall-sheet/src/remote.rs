//! Request body for the remote-sheet export endpoint (`POST /export-to-sheets`).

use chrono::{DateTime, TimeZone};
use rollcall_core::{entry::AttendanceEntry, export::ExportSnapshot};
use serde::{Deserialize, Serialize};

use crate::table::{format_date, format_time};

/// Characters a spreadsheet tab title may not contain.
const FORBIDDEN_IN_SHEET_NAME: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];
const MAX_SHEET_NAME: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetsRequest {
  pub subject:        String,
  /// Sections joined with `", "`.
  pub section:        String,
  /// Title of the tab to create.
  pub sheet_name:     String,
  pub spreadsheet_id: String,
  pub date:           String,
  pub time:           String,
  pub data:           Vec<AttendanceEntry>,
}

impl SheetsRequest {
  pub fn new<Tz: TimeZone>(snapshot: &ExportSnapshot, spreadsheet_id: &str, tz: &Tz) -> Self
  where
    Tz::Offset: std::fmt::Display,
  {
    Self {
      subject:        snapshot.subject.clone(),
      section:        snapshot.sections.to_string(),
      sheet_name:     sheet_name(snapshot, tz),
      spreadsheet_id: spreadsheet_id.to_owned(),
      date:           format_date(snapshot.taken_at, tz),
      time:           format_time(snapshot.taken_at, tz),
      data:           snapshot.entries.clone(),
    }
  }
}

/// `IPT 101 A, B 9-2-2024 15-30-09`, stripped of characters sheet titles
/// cannot hold and capped at the title length limit.
fn sheet_name<Tz: TimeZone>(snapshot: &ExportSnapshot, tz: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  let at: DateTime<Tz> = snapshot.taken_at.with_timezone(tz);
  let raw = format!(
    "{} {} {} {}",
    snapshot.subject,
    snapshot.sections,
    format_date(snapshot.taken_at, tz).replace('/', "-"),
    at.format("%H-%M-%S"),
  );
  raw
    .chars()
    .map(|c| if FORBIDDEN_IN_SHEET_NAME.contains(&c) { '-' } else { c })
    .take(MAX_SHEET_NAME)
    .collect()
}
