//! Lines typed (or piped) into `rollcall take`.

use rollcall_core::export::ExportFormat;

/// One line of input: either a scanned student id or a `:command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
  Blank,
  Scan(String),
  Export(ExportFormat),
  Sections(String),
  Subject(String),
  Quit,
  Invalid(String),
}

impl Input {
  /// `:export` without an argument uses `default_format`.
  pub fn parse(line: &str, default_format: ExportFormat) -> Self {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
      return if line.is_empty() { Self::Blank } else { Self::Scan(line.to_owned()) };
    };

    let (name, arg) = command
      .split_once(char::is_whitespace)
      .map(|(n, a)| (n, a.trim()))
      .unwrap_or((command, ""));

    match name {
      "q" | "quit" | "exit" => Self::Quit,
      "export" if arg.is_empty() => Self::Export(default_format),
      "export" => match arg.parse() {
        Ok(format) => Self::Export(format),
        Err(e) => Self::Invalid(e.to_string()),
      },
      "sections" | "section" => Self::Sections(arg.to_owned()),
      "subject" => Self::Subject(arg.to_owned()),
      other => Self::Invalid(format!(
        "unknown command :{other} (try :export [xlsx|csv|sheets], :sections <list>, :subject <name>, :quit)"
      )),
    }
  }
}
