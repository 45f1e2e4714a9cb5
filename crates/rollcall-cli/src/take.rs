//! `rollcall take`: the interactive attendance loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use rollcall_core::{export::ExportFormat, session::SessionDescriptor};
use rollcall_session::{ScanError, ui::Renderer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::{Session, input::Input, print_qr, terminal::Terminal};

pub async fn run(session: Arc<Session>, terminal: Arc<Terminal>, format: ExportFormat) -> Result<()> {
  print_qr(&session)?;
  terminal.render(&session.entries());
  println!("Scan or type student ids. Commands: :export [xlsx|csv|sheets], :sections <list>, :subject <name>, :quit");

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  while let Some(line) = lines.next_line().await.context("reading stdin")? {
    match Input::parse(&line, format) {
      Input::Blank => {}
      Input::Quit => break,
      Input::Scan(student_id) => {
        if terminal.is_paused() {
          debug!(%student_id, "scanner paused; input dropped");
          continue;
        }
        let session = Arc::clone(&session);
        tokio::spawn(async move {
          if let Err(ScanError::Busy) = session.scan(&student_id).await {
            debug!(%student_id, "previous scan still in flight; input dropped");
          }
        });
      }
      Input::Export(format) => export(&session, format).await,
      Input::Sections(sections) => {
        let subject = session.descriptor().subject;
        session.supersede(SessionDescriptor::from_inputs(&subject, &sections));
        print_qr(&session)?;
      }
      Input::Subject(subject) => {
        let sections = session.descriptor().sections.to_string();
        session.supersede(SessionDescriptor::from_inputs(&subject, &sections));
        print_qr(&session)?;
      }
      Input::Invalid(message) => eprintln!("{message}"),
    }
  }

  session.shutdown();
  Ok(())
}

async fn export(session: &Session, format: ExportFormat) {
  match session.export_and_purge(format).await {
    Ok(receipt) => println!("Exported {} rows to {}", receipt.rows, receipt.location),
    Err(e) => eprintln!("✘ {e}"),
  }
}
