//! Attendance entries: one per student per day.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::student::Student;

/// A recorded time-in. Immutable once created; corrections happen server-side
/// by deleting and re-adding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
  pub student_id: String,
  pub name:       String,
  pub course:     String,
  /// The single section this attendance counts toward.
  pub section:    String,
  pub time_in:    DateTime<Utc>,
  pub subject:    String,
}

impl AttendanceEntry {
  /// Stamp a new entry for `student` attending `section` of `subject`.
  pub fn new(student: &Student, section: &str, subject: &str, time_in: DateTime<Utc>) -> Self {
    Self {
      student_id: student.student_id.clone(),
      name: student.name.clone(),
      course: student.course.clone(),
      section: section.to_owned(),
      time_in,
      subject: subject.to_owned(),
    }
  }

  /// The calendar day of `time_in` as observed in `tz`.
  pub fn day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
    self.time_in.with_timezone(tz).date_naive()
  }
}

/// Most recent first; ties broken by student id so the order is total.
pub fn sort_most_recent_first(entries: &mut [AttendanceEntry]) {
  entries.sort_by(|a, b| {
    b.time_in
      .cmp(&a.time_in)
      .then_with(|| a.student_id.cmp(&b.student_id))
  });
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, FixedOffset};

  use super::*;

  fn entry(id: &str, time_in: DateTime<Utc>) -> AttendanceEntry {
    AttendanceEntry {
      student_id: id.into(),
      name:       "N".into(),
      course:     "C".into(),
      section:    "A".into(),
      time_in,
      subject:    "S".into(),
    }
  }

  #[test]
  fn day_depends_on_the_observing_zone() {
    // 2024-09-02 23:30 UTC is already Sept 3rd in Manila.
    let t = Utc.with_ymd_and_hms(2024, 9, 2, 23, 30, 0).unwrap();
    let manila = FixedOffset::east_opt(8 * 3600).unwrap();
    let e = entry("1", t);
    assert_eq!(e.day_in(&Utc), NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
    assert_eq!(e.day_in(&manila), NaiveDate::from_ymd_opt(2024, 9, 3).unwrap());
  }

  #[test]
  fn sorting_is_descending_with_id_tiebreak() {
    let t = Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap();
    let mut v = vec![
      entry("b", t),
      entry("c", t - Duration::minutes(5)),
      entry("a", t),
      entry("d", t + Duration::minutes(1)),
    ];
    sort_most_recent_first(&mut v);
    let ids: Vec<_> = v.iter().map(|e| e.student_id.as_str()).collect();
    assert_eq!(ids, vec!["d", "a", "b", "c"]);
  }

  #[test]
  fn wire_format_is_camel_case() {
    let t = Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap();
    let json = serde_json::to_value(entry("1", t)).unwrap();
    assert_eq!(json["studentId"], "1");
    assert!(json["timeIn"].as_str().unwrap().starts_with("2024-09-02T08:00:00"));

    let back: AttendanceEntry = serde_json::from_str(
      r#"{"studentId":"1","name":"N","course":"C","section":"A",
          "timeIn":"2024-09-02T08:00:00.000Z","subject":"S"}"#,
    )
    .unwrap();
    assert_eq!(back.time_in, t);
  }
}
