//! `rollcall seed`: import a roster CSV into the service.
//!
//! Columns: `studentId,name,course,section`. A header row is detected and
//! skipped; a section cell may hold several sections (`"A, B"`).

use std::path::Path;

use anyhow::{Context, Result, bail};
use rollcall_client::HttpRosterClient;
use rollcall_core::student::Student;
use rollcall_sheet::parse_record;
use tracing::info;

pub fn parse_roster(text: &str) -> Result<Vec<Student>> {
  let mut students = Vec::new();
  for (index, line) in text.lines().enumerate() {
    if line.trim().is_empty() {
      continue;
    }
    let fields = parse_record(line);
    if index == 0 && is_header(&fields) {
      continue;
    }
    let [student_id, name, course, section] = fields.as_slice() else {
      bail!("line {}: expected 4 fields, found {}", index + 1, fields.len());
    };
    if student_id.trim().is_empty() {
      bail!("line {}: empty student id", index + 1);
    }
    students.push(Student {
      student_id: student_id.trim().to_owned(),
      name:       name.trim().to_owned(),
      course:     course.trim().to_owned(),
      section:    section.trim().to_owned(),
    });
  }
  Ok(students)
}

fn is_header(fields: &[String]) -> bool {
  fields.first().is_some_and(|f| {
    let f = f.trim().to_ascii_lowercase();
    f == "studentid" || f == "student id" || f == "student_id"
  })
}

pub async fn run(client: &HttpRosterClient, path: &Path) -> Result<usize> {
  let text = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("reading roster {}", path.display()))?;
  let students = parse_roster(&text)?;

  for student in &students {
    client
      .put_student(student)
      .await
      .with_context(|| format!("uploading student {}", student.student_id))?;
  }
  info!(count = students.len(), "roster imported");
  Ok(students.len())
}
