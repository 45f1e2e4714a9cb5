//! Session descriptor and its QR payload.
//!
//! A descriptor is built from the instructor's subject and section inputs. It is
//! never mutated: changing either input produces a new descriptor.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  section::{SectionSet, parse_sections},
};

/// The value of the `type` field of every QR payload.
pub const PAYLOAD_TYPE: &str = "attendance";

// ─── Descriptor ──────────────────────────────────────────────────────────────

/// The class session currently configured by the instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
  pub subject:   String,
  pub sections:  SectionSet,
  pub issued_at: DateTime<Utc>,
}

impl SessionDescriptor {
  /// Build a descriptor from raw form inputs, stamped with the current time.
  ///
  /// No validation happens here: an empty section set is a legal (inactive)
  /// session. Use [`SessionDescriptor::encode`] to require a complete one.
  pub fn from_inputs(subject: &str, sections: &str) -> Self {
    Self {
      subject:   subject.trim().to_owned(),
      sections:  parse_sections(sections),
      issued_at: Utc::now(),
    }
  }

  /// `true` when at least one section is configured.
  pub fn is_active(&self) -> bool { !self.sections.is_empty() }

  /// Produce the QR payload for this descriptor.
  pub fn encode(&self, encoding: SectionEncoding) -> Result<QrPayload> {
    if self.subject.is_empty() {
      return Err(Error::MissingSubject);
    }
    if self.sections.is_empty() {
      return Err(Error::NoSectionConfigured);
    }
    let section = match encoding {
      SectionEncoding::Single => SectionField::Single(self.sections.join(", ")),
      SectionEncoding::List => {
        SectionField::List(self.sections.iter().map(str::to_owned).collect())
      }
    };
    Ok(QrPayload {
      subject: self.subject.clone(),
      section,
      timestamp: self.issued_at.to_rfc3339_opts(SecondsFormat::Millis, true),
      kind: PAYLOAD_TYPE.to_owned(),
    })
  }
}

// ─── Payload ─────────────────────────────────────────────────────────────────

/// How the `section` field of a QR payload is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionEncoding {
  /// Legacy single-string form: `"section": "A, B"`.
  #[default]
  Single,
  /// `"section": ["A", "B"]`.
  List,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionField {
  Single(String),
  List(Vec<String>),
}

/// The JSON structure embedded in the session QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
  pub subject:   String,
  pub section:   SectionField,
  /// RFC 3339 issue time, millisecond precision.
  pub timestamp: String,
  #[serde(rename = "type")]
  pub kind:      String,
}

impl QrPayload {
  pub fn to_json(&self) -> Result<String> { Ok(serde_json::to_string(self)?) }
}
