//! Line-oriented terminal frontend for a session.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Local, TimeZone};
use rollcall_core::entry::AttendanceEntry;
use rollcall_session::ui::{Notice, Notifier, Renderer, Scanner};
use rollcall_sheet::{COLUMNS, format_time_in};

/// Prints notices and the attendance table to stdout. Stdin is the scanner;
/// lines read while paused are dropped by the input loop.
#[derive(Debug, Default)]
pub struct Terminal {
  paused: AtomicBool,
}

impl Terminal {
  pub fn new() -> Self { Self::default() }

  pub fn is_paused(&self) -> bool { self.paused.load(Ordering::SeqCst) }
}

impl Scanner for Terminal {
  fn pause(&self) { self.paused.store(true, Ordering::SeqCst); }

  fn resume(&self) { self.paused.store(false, Ordering::SeqCst); }
}

impl Notifier for Terminal {
  async fn notify(&self, notice: &Notice) { println!("{}", describe(notice)); }
}

impl Renderer for Terminal {
  fn render(&self, entries: &[AttendanceEntry]) { print!("{}", render_table(entries, &Local)); }
}

pub fn describe(notice: &Notice) -> String {
  match notice {
    Notice::Recorded(e) => format!("✔ {} ({}) recorded for section {}", e.name, e.student_id, e.section),
    Notice::Rejected(reason) => format!("✘ {reason}"),
  }
}

/// Left-aligned, column-padded table; one header line, one rule, one line
/// per entry.
pub fn render_table<Tz: TimeZone>(entries: &[AttendanceEntry], tz: &Tz) -> String
where
  Tz::Offset: std::fmt::Display,
{
  let rows: Vec<[String; 5]> = entries
    .iter()
    .map(|e| {
      [
        e.student_id.clone(),
        e.name.clone(),
        e.course.clone(),
        e.section.clone(),
        format_time_in(e.time_in, tz),
      ]
    })
    .collect();

  let mut widths = COLUMNS.map(|c| c.chars().count());
  for row in &rows {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let line = |cells: &[&str]| -> String {
    let padded: Vec<String> = cells
      .iter()
      .zip(widths)
      .map(|(cell, w)| format!("{cell:<w$}"))
      .collect();
    format!("{}\n", padded.join("  ").trim_end())
  };

  let mut out = format!("\nAttendance ({})\n", entries.len());
  out.push_str(&line(&COLUMNS));
  let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
  out.push_str(&format!("{}\n", rule.join("  ")));
  for row in &rows {
    let cells: Vec<&str> = row.iter().map(String::as_str).collect();
    out.push_str(&line(&cells));
  }
  out
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use rollcall_core::student::Student;

  use super::*;

  fn entry(id: &str, name: &str, hour: u32) -> AttendanceEntry {
    let student = Student {
      student_id: id.into(),
      name:       name.into(),
      course:     "BSIT".into(),
      section:    "A".into(),
    };
    let at = Utc.with_ymd_and_hms(2024, 9, 2, hour, 5, 9).unwrap();
    AttendanceEntry::new(&student, "A", "IPT 101", at)
  }

  #[test]
  fn table_pads_columns_to_the_widest_cell() {
    let out = render_table(&[entry("2021-0002", "Ana Cruz", 8), entry("7", "Bo", 13)], &Utc);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[1], "Attendance (2)");
    assert!(lines[2].starts_with("Student ID  Name      Course"));
    assert!(lines[3].starts_with("----------  --------  ------"));
    assert!(lines[4].starts_with("2021-0002   Ana Cruz  BSIT"));
    assert!(lines[4].ends_with("9/2/2024, 8:05:09 AM"));
    assert!(lines[5].starts_with("7           Bo        BSIT"));
    assert!(lines[5].ends_with("9/2/2024, 1:05:09 PM"));
  }

  #[test]
  fn empty_ledger_still_renders_headers() {
    let out = render_table(&[], &Utc);
    assert!(out.contains("Attendance (0)"));
    assert!(out.contains("Student ID"));
  }

  #[test]
  fn notices_read_naturally() {
    let recorded = Notice::Recorded(entry("1", "Ana", 8));
    assert_eq!(describe(&recorded), "✔ Ana (1) recorded for section A");
    assert_eq!(describe(&Notice::Rejected("nope".into())), "✘ nope");
  }

  #[test]
  fn pause_state_follows_the_scanner_calls() {
    let t = Terminal::new();
    assert!(!t.is_paused());
    t.pause();
    assert!(t.is_paused());
    t.resume();
    assert!(!t.is_paused());
  }
}
