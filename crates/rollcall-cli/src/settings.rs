//! Connection and session settings: flags, then config file, then defaults.

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use rollcall_client::ClientConfig;
use serde::Deserialize;

const DEFAULT_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RETRIES: u32 = 2;
const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

/// Command-line (and environment) overrides shared by every subcommand.
#[derive(clap::Args, Debug, Default)]
pub struct Overrides {
  /// Base URL of the roster service (default: http://localhost:8080).
  #[arg(long, env = "ROLLCALL_URL", global = true)]
  pub url: Option<String>,

  /// Per-request timeout in seconds.
  #[arg(long, env = "ROLLCALL_TIMEOUT_SECS", global = true)]
  pub timeout_secs: Option<u64>,

  /// Extra attempts for idempotent requests.
  #[arg(long, env = "ROLLCALL_RETRIES", global = true)]
  pub retries: Option<u32>,

  /// Spreadsheet receiving `sheets` exports.
  #[arg(long, env = "ROLLCALL_SPREADSHEET_ID", global = true)]
  pub spreadsheet_id: Option<String>,

  /// How often the attendance table is refreshed, in milliseconds.
  #[arg(long, env = "ROLLCALL_POLL_INTERVAL_MS", global = true)]
  pub poll_interval_ms: Option<u64>,

  /// Directory for `xlsx` and `csv` exports.
  #[arg(long, env = "ROLLCALL_EXPORT_DIR", global = true)]
  pub export_dir: Option<PathBuf>,
}

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
  pub url:              Option<String>,
  pub timeout_secs:     Option<u64>,
  pub retries:          Option<u32>,
  pub spreadsheet_id:   Option<String>,
  pub poll_interval_ms: Option<u64>,
  pub export_dir:       Option<PathBuf>,
}

impl ConfigFile {
  pub fn load(path: &std::path::Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
  pub client:        ClientConfig,
  pub poll_interval: Duration,
  pub export_dir:    PathBuf,
}

impl Settings {
  pub fn resolve(flags: Overrides, file: ConfigFile) -> Self {
    let client = ClientConfig {
      base_url: flags.url.or(file.url).unwrap_or_else(|| DEFAULT_URL.to_owned()),
      timeout: Duration::from_secs(
        flags.timeout_secs.or(file.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS),
      ),
      retries: flags.retries.or(file.retries).unwrap_or(DEFAULT_RETRIES),
      spreadsheet_id: flags.spreadsheet_id.or(file.spreadsheet_id),
      ..ClientConfig::default()
    };
    Self {
      client,
      poll_interval: Duration::from_millis(
        flags
          .poll_interval_ms
          .or(file.poll_interval_ms)
          .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
      ),
      export_dir: flags
        .export_dir
        .or(file.export_dir)
        .unwrap_or_else(|| PathBuf::from(".")),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_fill_everything() {
    let s = Settings::resolve(Overrides::default(), ConfigFile::default());
    assert_eq!(s.client.base_url, DEFAULT_URL);
    assert_eq!(s.client.timeout, Duration::from_secs(10));
    assert_eq!(s.client.retries, 2);
    assert_eq!(s.client.spreadsheet_id, None);
    assert_eq!(s.poll_interval, Duration::from_millis(5_000));
    assert_eq!(s.export_dir, PathBuf::from("."));
  }

  #[test]
  fn flags_beat_file_which_beats_defaults() {
    let file: ConfigFile = toml::from_str(
      r#"
        url = "http://file:1"
        retries = 5
        spreadsheet_id = "from-file"
      "#,
    )
    .unwrap();
    let flags = Overrides { url: Some("http://flag:2".into()), ..Overrides::default() };

    let s = Settings::resolve(flags, file);

    assert_eq!(s.client.base_url, "http://flag:2");
    assert_eq!(s.client.retries, 5);
    assert_eq!(s.client.spreadsheet_id.as_deref(), Some("from-file"));
    assert_eq!(s.client.timeout, Duration::from_secs(10));
  }

  #[test]
  fn unknown_keys_are_rejected() {
    assert!(toml::from_str::<ConfigFile>("colour = \"red\"").is_err());
  }
}
