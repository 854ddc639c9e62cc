//! DNR capacity classes and their reserved id ranges.
//!
//! Every subcontractor id encodes its capacity class in a numeric band:
//! [300,400) for 300dnr, [600,700) for 600dnr, and `S`-prefixed sequences of
//! 100 and above for unspecified capacity. The range knowledge lives here so
//! the allocator and the reconciler never re-derive a class from raw strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A subcontractor's persisted production-line capacity class.
///
/// `both` is deliberately absent: it is a form-input option only, resolved by
/// the roster into two concrete records. See [`CapacityChoice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DnrCapacity {
  #[serde(rename = "300dnr")]
  Dnr300,
  #[serde(rename = "600dnr")]
  Dnr600,
  #[serde(rename = "none")]
  Unspecified,
}

impl DnrCapacity {
  /// The sequence value allocation starts from; the first issued id is
  /// `base + 1`.
  pub fn base(self) -> u32 {
    match self {
      Self::Dnr300 => 300,
      Self::Dnr600 => 600,
      Self::Unspecified => 100,
    }
  }

  /// Whether `seq` lies in this class's canonical band. Legacy sequences
  /// (e.g. the `2` in `"3-2"`) fall outside and are excluded from
  /// allocation arithmetic.
  pub fn contains(self, seq: u32) -> bool {
    match self {
      Self::Dnr300 => (300..400).contains(&seq),
      Self::Dnr600 => (600..700).contains(&seq),
      // No upper bound is reserved for the S-band.
      Self::Unspecified => seq >= 100,
    }
  }

  /// Display prefix for ids of this class.
  pub fn prefix(self) -> &'static str {
    match self {
      Self::Dnr300 | Self::Dnr600 => "",
      Self::Unspecified => "S",
    }
  }

  /// Classify a plain numeric id by its band, if it belongs to one.
  pub fn from_sequence(seq: u32) -> Option<Self> {
    if (300..400).contains(&seq) {
      Some(Self::Dnr300)
    } else if (600..700).contains(&seq) {
      Some(Self::Dnr600)
    } else {
      None
    }
  }
}

impl fmt::Display for DnrCapacity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::Dnr300 => "300dnr",
      Self::Dnr600 => "600dnr",
      Self::Unspecified => "none",
    };
    f.write_str(s)
  }
}

/// The capacity selection accepted on subcontractor forms.
///
/// Distinct from [`DnrCapacity`] so the ephemeral `both` option can never
/// leak into a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityChoice {
  #[serde(rename = "300dnr")]
  Dnr300,
  #[serde(rename = "600dnr")]
  Dnr600,
  #[serde(rename = "none")]
  Unspecified,
  #[serde(rename = "both")]
  Both,
}

impl CapacityChoice {
  /// The single concrete class this choice maps to, or `None` for `Both`.
  pub fn concrete(self) -> Option<DnrCapacity> {
    match self {
      Self::Dnr300 => Some(DnrCapacity::Dnr300),
      Self::Dnr600 => Some(DnrCapacity::Dnr600),
      Self::Unspecified => Some(DnrCapacity::Unspecified),
      Self::Both => None,
    }
  }
}
