//! The attendance ledger: the renderer-facing view of the active session.
//!
//! The ledger is a cache of backend state plus locally committed entries that
//! have not yet come back through a sync. It upholds two invariants at all
//! times:
//!
//! - at most one entry per (student id, calendar day of `time_in`);
//! - every entry's section belongs to the ledger's section set.
//!
//! Entries are kept most-recent-first so that a ledger built from local
//! appends compares equal to the same data fetched from the backend.
//!
//! Every mutation bumps a generation counter. A backend fetch started at one
//! generation must not be adopted at another.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::{
  Error, Result,
  entry::{AttendanceEntry, sort_most_recent_first},
  section::SectionSet,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
  sections:   SectionSet,
  entries:    Vec<AttendanceEntry>,
  generation: u64,
}

impl Ledger {
  /// An empty ledger scoped to `sections`.
  pub fn new(sections: SectionSet) -> Self {
    Self { sections, entries: Vec::new(), generation: 0 }
  }

  /// Incremented by every record, replace, clear and rescope.
  pub fn generation(&self) -> u64 { self.generation }

  pub fn sections(&self) -> &SectionSet { &self.sections }

  pub fn entries(&self) -> &[AttendanceEntry] { &self.entries }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// An owned copy of the entries, most recent first.
  pub fn snapshot(&self) -> Vec<AttendanceEntry> { self.entries.clone() }

  /// The entry for `student_id` on the calendar day of `at` (as seen in
  /// `tz`), if any.
  pub fn find_same_day<Tz: TimeZone>(
    &self,
    student_id: &str,
    at: DateTime<Utc>,
    tz: &Tz,
  ) -> Option<&AttendanceEntry> {
    let day = at.with_timezone(tz).date_naive();
    self
      .entries
      .iter()
      .find(|e| e.student_id == student_id && e.day_in(tz) == day)
  }

  /// Append a locally committed entry.
  ///
  /// Rejects entries outside the section set and second entries for the same
  /// student on the same day.
  pub fn record<Tz: TimeZone>(&mut self, entry: AttendanceEntry, tz: &Tz) -> Result<()> {
    if !self.sections.contains(&entry.section) {
      return Err(Error::SectionOutOfScope(entry.section));
    }
    if self.find_same_day(&entry.student_id, entry.time_in, tz).is_some() {
      return Err(Error::DuplicateAttendance {
        day:        entry.day_in(tz),
        student_id: entry.student_id,
      });
    }
    self.entries.push(entry);
    sort_most_recent_first(&mut self.entries);
    self.generation += 1;
    Ok(())
  }

  /// Turn a raw backend collection into what this ledger would hold: entries
  /// in scope, most recent first, one per student per day (the earliest
  /// time-in wins).
  pub fn materialize<Tz, I>(&self, remote: I, tz: &Tz) -> Vec<AttendanceEntry>
  where
    Tz: TimeZone,
    I: IntoIterator<Item = AttendanceEntry>,
  {
    let mut scoped: Vec<AttendanceEntry> = remote
      .into_iter()
      .filter(|e| self.sections.contains(&e.section))
      .collect();
    sort_most_recent_first(&mut scoped);

    let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();
    let mut kept: Vec<AttendanceEntry> = scoped
      .into_iter()
      .rev()
      .filter(|e| seen.insert((e.student_id.clone(), e.day_in(tz))))
      .collect();
    kept.reverse();
    kept
  }

  /// Replace the contents with `entries` unless they are structurally equal
  /// to what is already held. Returns `true` if the ledger changed.
  ///
  /// `entries` must come from [`Ledger::materialize`].
  pub fn replace_if_changed(&mut self, entries: Vec<AttendanceEntry>) -> bool {
    if self.entries == entries {
      return false;
    }
    self.entries = entries;
    self.generation += 1;
    true
  }

  /// Drop every entry. Returns `true` if anything was removed.
  ///
  /// The generation moves even when the ledger was already empty: a clear
  /// follows a purge, and fetches from before it are stale.
  pub fn clear(&mut self) -> bool {
    let changed = !self.entries.is_empty();
    self.entries.clear();
    self.generation += 1;
    changed
  }

  /// Switch to a new section set, dropping entries no longer in scope.
  pub fn rescope(&mut self, sections: SectionSet) {
    self.entries.retain(|e| sections.contains(&e.section));
    self.sections = sections;
    self.generation += 1;
  }
}
