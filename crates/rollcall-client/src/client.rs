//! Async HTTP client for the roster service.

use std::{collections::BTreeMap, time::Duration};

use chrono::Local;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use rollcall_core::{
  entry::AttendanceEntry,
  export::{ExportFormat, ExportReceipt, ExportSink, ExportSnapshot},
  roster::RosterClient,
  student::Student,
};
use rollcall_sheet::SheetsRequest;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Connection settings for the roster service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url:       String,
  /// Applied to every request, connect through body.
  pub timeout:        Duration,
  /// Extra attempts for GET, PUT and DELETE. POSTs are never retried.
  pub retries:        u32,
  /// Delay before the first retry; doubles on each further one.
  pub backoff:        Duration,
  /// Target of remote-sheet exports.
  pub spreadsheet_id: Option<String>,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url:       "http://127.0.0.1:8080".into(),
      timeout:        Duration::from_secs(10),
      retries:        2,
      backoff:        Duration::from_millis(250),
      spreadsheet_id: None,
    }
  }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetsResponse {
  spreadsheet_url: String,
}

/// HTTP implementation of [`RosterClient`], plus the remote-sheet
/// [`ExportSink`].
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct HttpRosterClient {
  http:   Client,
  base:   Url,
  config: ClientConfig,
}

impl HttpRosterClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let base = Url::parse(&config.base_url)
      .map_err(|_| Error::InvalidBaseUrl(config.base_url.clone()))?;
    if base.cannot_be_a_base() {
      return Err(Error::InvalidBaseUrl(config.base_url.clone()));
    }
    let http = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { http, base, config })
  }

  pub fn config(&self) -> &ClientConfig { &self.config }

  /// `base` + percent-encoded `segments`.
  pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|()| Error::InvalidBaseUrl(self.config.base_url.clone()))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  /// Send an idempotent request, retrying transport failures and 5xx
  /// answers with exponential backoff.
  async fn send_idempotent(&self, build: impl Fn() -> RequestBuilder) -> Result<Response> {
    let mut attempt = 0u32;
    loop {
      let outcome = build().send().await;
      let transient = match &outcome {
        Ok(resp) => resp.status().is_server_error(),
        Err(e) => e.is_timeout() || e.is_connect(),
      };
      if !transient || attempt >= self.config.retries {
        return Ok(outcome?);
      }
      let delay = self.config.backoff.saturating_mul(2u32.saturating_pow(attempt));
      attempt += 1;
      debug!(attempt, ?delay, "retrying request");
      tokio::time::sleep(delay).await;
    }
  }

  // ── Roster ────────────────────────────────────────────────────────────────

  /// `PUT /students/{id}`
  pub async fn put_student(&self, student: &Student) -> Result<()> {
    let url = self.endpoint(&["students", &student.student_id])?;
    let resp = self
      .send_idempotent(|| self.http.request(Method::PUT, url.clone()).json(student))
      .await?;
    expect_success("PUT", resp)?;
    Ok(())
  }
}

fn expect_success(method: &'static str, resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    Ok(resp)
  } else {
    Err(Error::Status { method, path: resp.url().path().to_owned(), status })
  }
}

impl RosterClient for HttpRosterClient {
  type Error = Error;

  /// `GET /students/{id}`; 404 and a `null` body both mean "no such student".
  async fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
    let url = self.endpoint(&["students", student_id])?;
    let resp = self.send_idempotent(|| self.http.get(url.clone())).await?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    Ok(expect_success("GET", resp)?.json().await?)
  }

  /// `GET /attendance`; the backend answers with an id → entry map, or
  /// `null` when the collection is empty.
  async fn list_attendance(&self) -> Result<Vec<AttendanceEntry>> {
    let url = self.endpoint(&["attendance"])?;
    let resp = self.send_idempotent(|| self.http.get(url.clone())).await?;
    let map: Option<BTreeMap<String, AttendanceEntry>> =
      expect_success("GET", resp)?.json().await?;
    Ok(map.map(|m| m.into_values().collect()).unwrap_or_default())
  }

  /// `POST /attendance`
  async fn append_attendance(&self, entry: &AttendanceEntry) -> Result<()> {
    let url = self.endpoint(&["attendance"])?;
    let resp = self.http.post(url).json(entry).send().await?;
    expect_success("POST", resp)?;
    Ok(())
  }

  /// `DELETE /attendance/delete/{section}`
  async fn delete_section_attendance(&self, section: &str) -> Result<()> {
    let url = self.endpoint(&["attendance", "delete", section])?;
    let resp = self.send_idempotent(|| self.http.delete(url.clone())).await?;
    expect_success("DELETE", resp)?;
    Ok(())
  }
}

impl ExportSink for HttpRosterClient {
  type Error = Error;

  /// `POST /export-to-sheets`. Only [`ExportFormat::GoogleSheet`] is handled
  /// here; files go through [`rollcall_sheet::FileSink`].
  async fn export(
    &self,
    format: ExportFormat,
    snapshot: &ExportSnapshot,
  ) -> Result<ExportReceipt> {
    if format != ExportFormat::GoogleSheet {
      return Err(rollcall_sheet::Error::UnsupportedFormat(format).into());
    }
    let spreadsheet_id = self
      .config
      .spreadsheet_id
      .as_deref()
      .ok_or(Error::MissingSpreadsheetId)?;

    let body = SheetsRequest::new(snapshot, spreadsheet_id, &Local);
    let url = self.endpoint(&["export-to-sheets"])?;
    let resp = self.http.post(url).json(&body).send().await?;
    let SheetsResponse { spreadsheet_url } = expect_success("POST", resp)?.json().await?;

    info!(sheet = %body.sheet_name, url = %spreadsheet_url, "exported to remote sheet");
    Ok(ExportReceipt { format, location: spreadsheet_url, rows: snapshot.entries.len() })
  }
}
