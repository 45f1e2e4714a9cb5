//! `rollcall`: take QR attendance from the terminal.
//!
//! # Usage
//!
//! ```text
//! rollcall qr     --subject "IPT 101" --sections "A, B"
//! rollcall take   --subject "IPT 101" --sections "A, B"
//! rollcall export --subject "IPT 101" --sections "A, B" --format csv
//! rollcall seed   roster.csv
//! rollcall --config ~/.config/rollcall/config.toml take ...
//! ```

mod input;
mod seed;
mod settings;
mod take;
mod terminal;

use std::{
  io::{self, Write as _},
  path::PathBuf,
  sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rollcall_client::{Exporter, HttpRosterClient};
use rollcall_core::{
  export::ExportFormat,
  session::{SectionEncoding, SessionDescriptor},
};
use rollcall_session::{AttendanceSession, SessionConfig};
use rollcall_sheet::FileSink;
use settings::{ConfigFile, Overrides, Settings};
use terminal::Terminal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub type Session = AttendanceSession<HttpRosterClient, Exporter, Terminal>;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rollcall", about = "QR attendance taking against a roster service")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", env = "ROLLCALL_CONFIG", global = true)]
  config: Option<PathBuf>,

  #[command(flatten)]
  overrides: Overrides,

  #[command(subcommand)]
  command: Command,
}

#[derive(clap::Args, Debug)]
struct ClassArgs {
  /// Subject name, e.g. "IPT 101".
  #[arg(long)]
  subject: String,

  /// Comma-separated sections, e.g. "A, B".
  #[arg(long)]
  sections: String,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the QR payload for a class session.
  Qr {
    #[command(flatten)]
    class: ClassArgs,

    /// Write `section` as a JSON list instead of one joined string.
    #[arg(long)]
    list: bool,
  },

  /// Take attendance; scanned ids arrive on stdin, one per line.
  Take {
    #[command(flatten)]
    class: ClassArgs,

    /// Format used by a bare `:export`.
    #[arg(long, default_value = "xlsx")]
    format: ExportFormat,
  },

  /// Export the session's attendance, then purge it from the service.
  Export {
    #[command(flatten)]
    class: ClassArgs,

    /// xlsx, csv or sheets.
    #[arg(long, default_value = "xlsx")]
    format: ExportFormat,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,
  },

  /// Import students from a CSV file (studentId,name,course,section).
  Seed {
    file: PathBuf,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg = match &args.config {
    Some(path) => ConfigFile::load(path)?,
    None => ConfigFile::default(),
  };
  let settings = Settings::resolve(args.overrides, file_cfg);

  match args.command {
    Command::Qr { class, list } => {
      let encoding = if list { SectionEncoding::List } else { SectionEncoding::Single };
      let payload = SessionDescriptor::from_inputs(&class.subject, &class.sections)
        .encode(encoding)
        .context("cannot build a QR payload")?;
      println!("{}", payload.to_json()?);
    }
    Command::Take { class, format } => {
      let terminal = Arc::new(Terminal::new());
      let session = activate(&settings, &class, Arc::clone(&terminal))?;
      take::run(session, terminal, format).await?;
    }
    Command::Export { class, format, yes } => {
      let session = activate(&settings, &class, Arc::new(Terminal::new()))?;
      let result = export_once(&session, format, yes).await;
      session.shutdown();
      result?;
    }
    Command::Seed { file } => {
      let client = HttpRosterClient::new(settings.client).context("building HTTP client")?;
      let count = seed::run(&client, &file).await?;
      println!("Imported {count} students");
    }
  }

  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn activate(settings: &Settings, class: &ClassArgs, terminal: Arc<Terminal>) -> Result<Arc<Session>> {
  let client = HttpRosterClient::new(settings.client.clone()).context("building HTTP client")?;
  let exporter = Exporter::new(FileSink::new(&settings.export_dir), client.clone());
  let config = SessionConfig { poll_interval: settings.poll_interval, ..SessionConfig::default() };

  Ok(Arc::new(AttendanceSession::activate(
    Arc::new(client),
    Arc::new(exporter),
    terminal,
    SessionDescriptor::from_inputs(&class.subject, &class.sections),
    config,
  )))
}

pub fn print_qr(session: &Session) -> Result<()> {
  match session.qr_payload() {
    Ok(payload) => println!("QR payload: {}", payload.to_json()?),
    Err(e) => eprintln!("No QR code: {e}"),
  }
  Ok(())
}

async fn export_once(session: &Session, format: ExportFormat, yes: bool) -> Result<()> {
  session.sync_now().await.context("loading attendance")?;
  let descriptor = session.descriptor();
  let rows = session.entries().len();

  if !yes {
    let prompt = format!(
      "Export {rows} entries as {format} and delete sections {} from the service? [y/N] ",
      descriptor.sections
    );
    if !confirm(&prompt).await? {
      println!("Aborted");
      return Ok(());
    }
  }

  let receipt = session.export_and_purge(format).await?;
  println!("Exported {} rows to {}", receipt.rows, receipt.location);
  Ok(())
}

async fn confirm(prompt: &str) -> Result<bool> {
  print!("{prompt}");
  io::stdout().flush().ok();
  let mut line = String::new();
  BufReader::new(tokio::io::stdin())
    .read_line(&mut line)
    .await
    .context("reading confirmation")?;
  Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
