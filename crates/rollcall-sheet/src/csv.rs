//! CSV serialization (RFC 4180 quoting, LF line endings) and single-record
//! parsing for roster imports.

use crate::table::Sheet;

/// Quote a field only when it contains a delimiter, quote or line break.
fn quote(s: &str) -> String {
  if s.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", s.replace('"', "\"\""))
  } else {
    s.to_owned()
  }
}

/// Render `sheet` as CSV text.
pub fn to_csv(sheet: &Sheet) -> String {
  let mut out = String::new();
  for row in &sheet.rows {
    let line: Vec<String> = row.iter().map(|cell| quote(cell)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
  }
  out
}

/// Split one CSV line into fields, honouring quotes and `""` escapes.
pub fn parse_record(line: &str) -> Vec<String> {
  let mut fields = Vec::new();
  let mut field = String::new();
  let mut in_quotes = false;
  let mut chars = line.chars().peekable();

  while let Some(ch) = chars.next() {
    match ch {
      '"' if in_quotes && chars.peek() == Some(&'"') => {
        field.push('"');
        chars.next();
      }
      '"' => in_quotes = !in_quotes,
      ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
      _ => field.push(ch),
    }
  }
  fields.push(field);
  fields
}
