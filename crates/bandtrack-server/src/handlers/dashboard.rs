//! `GET /api/metrics` — live operational counts for the dashboard.

use axum::{Json, extract::State};
use serde::Serialize;

use bandtrack_core::{access::Permission, ledger::QualityStatus};

use crate::{
  AppState,
  auth::{CurrentUser, require},
  error::Error,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
  pub in_house_employees: usize,
  pub subcontractors:     usize,
  pub dispatched_units:   u64,
  pub returned_units:     u64,
  pub damaged_units:      u64,
}

pub async fn metrics(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<Metrics>, Error> {
  require(&user, Permission::ViewDashboard)?;

  let roster = state.roster.read().await;
  let ledger = state.ledger.read().await;

  let dispatched_units =
    ledger.dispatches().iter().map(|d| u64::from(d.quantity)).sum();
  let returned_units =
    ledger.returns().iter().map(|r| u64::from(r.quantity)).sum();
  let damaged_units = ledger
    .returns()
    .iter()
    .filter(|r| r.quality_status == QualityStatus::Damaged)
    .map(|r| u64::from(r.quantity))
    .sum();

  Ok(Json(Metrics {
    in_house_employees: roster.employees().len(),
    subcontractors: roster.subcontractors().len(),
    dispatched_units,
    returned_units,
    damaged_units,
  }))
}
