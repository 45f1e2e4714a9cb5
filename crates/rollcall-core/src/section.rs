//! Section sets: the unit of class membership.
//!
//! Both the instructor's section field and a student's `section` value are
//! parsed the same way: comma-separated, trimmed, empties dropped. Matching
//! between the two is set intersection on the exact trimmed names.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered, duplicate-free set of section names.
///
/// Insertion order is kept so that the first-entered section stays first in
/// exported headers and QR payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SectionSet(Vec<String>);

impl SectionSet {
  pub fn new() -> Self { Self(Vec::new()) }

  /// Add `name` (trimmed) unless it is empty or already present.
  /// Returns `true` if the set changed.
  pub fn insert(&mut self, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || self.contains(name) {
      return false;
    }
    self.0.push(name.to_owned());
    true
  }

  pub fn contains(&self, name: &str) -> bool {
    let name = name.trim();
    self.0.iter().any(|s| s == name)
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = &str> { self.0.iter().map(String::as_str) }

  pub fn first(&self) -> Option<&str> { self.0.first().map(String::as_str) }

  /// `true` if at least one section is in both sets.
  pub fn intersects(&self, other: &SectionSet) -> bool {
    self.iter().any(|s| other.contains(s))
  }

  /// The first section of `self` (in `self`'s order) that `other` contains.
  pub fn first_shared<'a>(&'a self, other: &SectionSet) -> Option<&'a str> {
    self.iter().find(|s| other.contains(s))
  }

  /// Sections joined with `sep`, e.g. `"A, B"`.
  pub fn join(&self, sep: &str) -> String { self.0.join(sep) }
}

/// Split a comma-separated section field into a [`SectionSet`].
pub fn parse_sections(input: &str) -> SectionSet {
  let mut set = SectionSet::new();
  for part in input.split(',') {
    set.insert(part);
  }
  set
}

impl fmt::Display for SectionSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.join(", "))
  }
}

impl<'a> FromIterator<&'a str> for SectionSet {
  fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
    let mut set = SectionSet::new();
    for name in iter {
      set.insert(name);
    }
    set
  }
}

impl Serialize for SectionSet {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.0.serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for SectionSet {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.iter().map(String::as_str).collect())
  }
}
