//! Material dispatch and return ledger.
//!
//! Records material sent out to subcontractors and finished goods coming
//! back, newest first. The ledger assigns ids and timestamps itself; callers
//! supply the business fields and the resolved subcontractor display name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::id::SubcontractorId;

/// The fixed material catalogue offered on the dispatch form.
pub const MATERIAL_TYPES: &[&str] =
  &["Fabric A", "Fabric B", "Threads", "Buttons", "Zippers"];

/// Quality verdict for returned goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityStatus {
  Good,
  Damaged,
  #[serde(rename = "Needs Rework")]
  NeedsRework,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A material dispatch event to a subcontractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDispatch {
  pub id:                 Uuid,
  pub subcontractor_id:   SubcontractorId,
  pub subcontractor_name: Option<String>,
  pub material_type:      String,
  pub quantity:           u32,
  pub dispatch_date:      DateTime<Utc>,
}

/// A logged return of finished goods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialReturn {
  pub id:                 Uuid,
  pub subcontractor_id:   SubcontractorId,
  pub subcontractor_name: Option<String>,
  pub quantity:           u32,
  pub quality_status:     QualityStatus,
  pub return_date:        DateTime<Utc>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDispatch {
  pub subcontractor_id: SubcontractorId,
  pub material_type:    String,
  pub quantity:         u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReturn {
  pub subcontractor_id: SubcontractorId,
  pub quantity:         u32,
  pub quality_status:   QualityStatus,
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Ledger {
  dispatches: Vec<MaterialDispatch>,
  returns:    Vec<MaterialReturn>,
}

impl Ledger {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn dispatches(&self) -> &[MaterialDispatch] {
    &self.dispatches
  }

  pub fn returns(&self) -> &[MaterialReturn] {
    &self.returns
  }

  /// Record a dispatch; id and timestamp are assigned here.
  pub fn log_dispatch(
    &mut self,
    input: NewDispatch,
    subcontractor_name: Option<String>,
  ) -> MaterialDispatch {
    let dispatch = MaterialDispatch {
      id: Uuid::new_v4(),
      subcontractor_id: input.subcontractor_id,
      subcontractor_name,
      material_type: input.material_type,
      quantity: input.quantity,
      dispatch_date: Utc::now(),
    };
    self.dispatches.insert(0, dispatch.clone());
    dispatch
  }

  /// Record a return; id and timestamp are assigned here.
  pub fn log_return(
    &mut self,
    input: NewReturn,
    subcontractor_name: Option<String>,
  ) -> MaterialReturn {
    let ret = MaterialReturn {
      id: Uuid::new_v4(),
      subcontractor_id: input.subcontractor_id,
      subcontractor_name,
      quantity: input.quantity,
      quality_status: input.quality_status,
      return_date: Utc::now(),
    };
    self.returns.insert(0, ret.clone());
    ret
  }
}
