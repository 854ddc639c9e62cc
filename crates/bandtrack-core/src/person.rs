//! Personnel records and their form-level input shapes.
//!
//! Records are value objects; cloning one shares no mutable state. Name,
//! work type, and contact are validated at the form boundary, not here.

use serde::{Deserialize, Serialize};

use crate::{
  capacity::{CapacityChoice, DnrCapacity},
  id::{EmployeeId, SubcontractorId},
};

/// An in-house employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
  pub id:        EmployeeId,
  pub name:      String,
  pub work_type: String,
  pub contact:   String,
}

/// A subcontractor. The id's numeric band always matches `dnr_capacity`;
/// the roster's reconciler maintains that invariant across edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcontractor {
  pub id:           SubcontractorId,
  pub name:         String,
  pub work_type:    String,
  pub contact:      String,
  pub dnr_capacity: DnrCapacity,
}

impl Subcontractor {
  /// Whether `other` is this record's counterpart from a `both` split:
  /// a different id carrying the same name, work type, and contact.
  pub fn is_paired_with(&self, other: &Subcontractor) -> bool {
    self.id != other.id
      && self.name == other.name
      && self.work_type == other.work_type
      && self.contact == other.contact
  }
}

/// The fields supplied for a new or edited person; the id is never accepted
/// from callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
  pub name:      String,
  pub work_type: String,
  pub contact:   String,
}

/// Input for adding or editing a subcontractor. `dnr_capacity` here is a
/// [`CapacityChoice`]: selecting `both` always materialises as two records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcontractorInput {
  pub name:         String,
  pub work_type:    String,
  pub contact:      String,
  pub dnr_capacity: CapacityChoice,
}
