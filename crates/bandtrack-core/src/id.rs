//! Typed personnel identifiers and the identifier allocator.
//!
//! Historical data spells ids inconsistently: plain numerics (`"301"`),
//! dash-prefixed forms from an older generation (`"3-2"`, `"6-1"`, `"S-5"`),
//! and canonical prefixed forms (`"S105"`). Ids are parsed into a typed
//! `{class, sequence}` pair once, at ingestion; downstream code never derives
//! a class from a raw string again. The exact source spelling is retained so
//! legacy ids round-trip unchanged through serialisation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  capacity::DnrCapacity,
  person::{Employee, Subcontractor},
};

// ─── SubcontractorId ─────────────────────────────────────────────────────────

/// A validated subcontractor identifier.
///
/// Equality and hashing are over the raw string: ids are unique as strings
/// within the collection, whatever their generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubcontractorId {
  raw:   String,
  class: DnrCapacity,
  seq:   u32,
}

impl SubcontractorId {
  /// Build a canonically-spelled id: `"303"`, `"601"`, `"S101"`.
  pub fn from_parts(class: DnrCapacity, seq: u32) -> Self {
    Self {
      raw: format!("{}{}", class.prefix(), seq),
      class,
      seq,
    }
  }

  /// Parse any historical spelling. Rejects strings whose class cannot be
  /// determined (e.g. a plain `"105"`, which sits in no reserved band).
  pub fn parse(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidId(s.to_string());

    let (class, digits) = if let Some(rest) = s.strip_prefix('S') {
      (DnrCapacity::Unspecified, rest.strip_prefix('-').unwrap_or(rest))
    } else if let Some(rest) = s.strip_prefix("3-") {
      (DnrCapacity::Dnr300, rest)
    } else if let Some(rest) = s.strip_prefix("6-") {
      (DnrCapacity::Dnr600, rest)
    } else {
      let seq: u32 = s.parse().map_err(|_| invalid())?;
      let class = DnrCapacity::from_sequence(seq).ok_or_else(invalid)?;
      return Ok(Self { raw: s.to_string(), class, seq });
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
      return Err(invalid());
    }
    let seq: u32 = digits.parse().map_err(|_| invalid())?;

    Ok(Self { raw: s.to_string(), class, seq })
  }

  pub fn class(&self) -> DnrCapacity {
    self.class
  }

  pub fn sequence(&self) -> u32 {
    self.seq
  }

  pub fn as_str(&self) -> &str {
    &self.raw
  }

  /// The range test shared by the allocator and the reconciler: the class
  /// matches *and* the sequence lies in the class's canonical band. Legacy
  /// ids like `"3-2"` fail this even for their own class and are re-keyed on
  /// the next capacity edit.
  pub fn in_range(&self, capacity: DnrCapacity) -> bool {
    self.class == capacity && capacity.contains(self.seq)
  }
}

impl fmt::Display for SubcontractorId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

impl FromStr for SubcontractorId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}

impl TryFrom<String> for SubcontractorId {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> {
    Self::parse(&s)
  }
}

impl From<SubcontractorId> for String {
  fn from(id: SubcontractorId) -> Self {
    id.raw
  }
}

// ─── EmployeeId ──────────────────────────────────────────────────────────────

/// An in-house employee identifier: `"emp<N>"`, with the legacy `"emp-<N>"`
/// spelling accepted on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId {
  raw: String,
  seq: u32,
}

impl EmployeeId {
  pub fn from_sequence(seq: u32) -> Self {
    Self { raw: format!("emp{seq}"), seq }
  }

  pub fn parse(s: &str) -> Result<Self> {
    let invalid = || Error::InvalidId(s.to_string());
    let rest = s.strip_prefix("emp").ok_or_else(invalid)?;
    let digits = rest.strip_prefix('-').unwrap_or(rest);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
      return Err(invalid());
    }
    let seq: u32 = digits.parse().map_err(|_| invalid())?;
    Ok(Self { raw: s.to_string(), seq })
  }

  pub fn sequence(&self) -> u32 {
    self.seq
  }

  pub fn as_str(&self) -> &str {
    &self.raw
  }
}

impl fmt::Display for EmployeeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

impl FromStr for EmployeeId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Self::parse(s)
  }
}

impl TryFrom<String> for EmployeeId {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> {
    Self::parse(&s)
  }
}

impl From<EmployeeId> for String {
  fn from(id: EmployeeId) -> Self {
    id.raw
  }
}

// ─── Allocation ──────────────────────────────────────────────────────────────

/// Compute the next free subcontractor id for `capacity`.
///
/// Takes the maximum in-band sequence among the live records (out-of-band
/// legacy sequences are skipped, never an error) and adds one; an empty band
/// starts from `base + 1`. The result is always in range for `capacity` and
/// never collides with an existing id: any canonical spelling already present
/// contributes its sequence to the maximum.
///
/// Fails with [`Error::IdRangeExhausted`] when the successor would leave the
/// band, so a full band can never mint an out-of-band or duplicate id.
pub fn next_subcontractor_id(
  capacity: DnrCapacity,
  existing: &[Subcontractor],
) -> Result<SubcontractorId> {
  let max = existing
    .iter()
    .filter(|s| s.id.in_range(capacity))
    .map(|s| s.id.sequence())
    .max()
    .unwrap_or(capacity.base());
  let seq = max
    .checked_add(1)
    .filter(|&seq| capacity.contains(seq))
    .ok_or_else(|| Error::IdRangeExhausted(capacity.to_string()))?;
  Ok(SubcontractorId::from_parts(capacity, seq))
}

/// Compute the next free employee id: one past the highest numeric suffix,
/// starting from `emp101` on an empty collection.
pub fn next_employee_id(existing: &[Employee]) -> Result<EmployeeId> {
  let max = existing
    .iter()
    .map(|e| e.id.sequence())
    .max()
    .unwrap_or(100);
  let seq = max
    .checked_add(1)
    .ok_or_else(|| Error::IdRangeExhausted("emp".to_string()))?;
  Ok(EmployeeId::from_sequence(seq))
}
