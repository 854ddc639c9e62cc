//! Handlers for the roster endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/roster/employees` | |
//! | `POST`   | `/api/roster/employees` | Body: `{name, workType, contact}` |
//! | `PUT`    | `/api/roster/employees/{id}` | 404 if absent |
//! | `GET`    | `/api/roster/subcontractors` | Optional `?capacity=300dnr\|600dnr\|none` |
//! | `POST`   | `/api/roster/subcontractors` | `dnrCapacity: "both"` creates two records |
//! | `PUT`    | `/api/roster/subcontractors/{id}` | Reconciles capacity changes |
//! | `DELETE` | `/api/roster/personnel/{id}` | Either collection |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;

use bandtrack_core::{
  access::Permission,
  capacity::DnrCapacity,
  id::{EmployeeId, SubcontractorId},
  person::{Employee, PersonInput, Subcontractor, SubcontractorInput},
};

use crate::{
  AppState,
  auth::{CurrentUser, require},
  error::Error,
};

// ─── Employees ───────────────────────────────────────────────────────────────

/// `GET /api/roster/employees`
pub async fn list_employees(
  State(state): State<AppState>,
  CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<Employee>>, Error> {
  let roster = state.roster.read().await;
  Ok(Json(roster.employees().to_vec()))
}

/// `POST /api/roster/employees`
pub async fn create_employee(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Json(input): Json<PersonInput>,
) -> Result<impl IntoResponse, Error> {
  require(&user, Permission::ManagePersonnel)?;
  let employee = state.roster.write().await.add_employee(input)?;
  tracing::info!(id = %employee.id, "employee added");
  Ok((StatusCode::CREATED, Json(employee)))
}

/// `PUT /api/roster/employees/{id}`
pub async fn update_employee(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<String>,
  Json(input): Json<PersonInput>,
) -> Result<Json<Employee>, Error> {
  require(&user, Permission::ManagePersonnel)?;
  let id = EmployeeId::parse(&id)?;
  let employee = state.roster.write().await.update_employee(&id, input)?;
  Ok(Json(employee))
}

// ─── Subcontractors ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub capacity: Option<DnrCapacity>,
}

/// `GET /api/roster/subcontractors[?capacity=<capacity>]`
pub async fn list_subcontractors(
  State(state): State<AppState>,
  CurrentUser(_user): CurrentUser,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Subcontractor>>, Error> {
  let roster = state.roster.read().await;
  Ok(Json(roster.list_subcontractors(params.capacity)))
}

/// `POST /api/roster/subcontractors` — returns the created record(s); two
/// for a `both` selection.
pub async fn create_subcontractor(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Json(input): Json<SubcontractorInput>,
) -> Result<impl IntoResponse, Error> {
  require(&user, Permission::ManagePersonnel)?;
  let created = state.roster.write().await.add_subcontractor(input)?;
  for record in &created {
    tracing::info!(id = %record.id, capacity = %record.dnr_capacity, "subcontractor added");
  }
  Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/roster/subcontractors/{id}` — returns the record(s) the person
/// is represented by after the edit.
pub async fn update_subcontractor(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<String>,
  Json(input): Json<SubcontractorInput>,
) -> Result<Json<Vec<Subcontractor>>, Error> {
  require(&user, Permission::ManagePersonnel)?;
  let id = SubcontractorId::parse(&id)?;
  let finals = state.roster.write().await.update_subcontractor(&id, input)?;
  Ok(Json(finals))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /api/roster/personnel/{id}` — removes from whichever collection
/// holds the id.
pub async fn delete_person(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Path(id): Path<String>,
) -> Result<StatusCode, Error> {
  require(&user, Permission::ManagePersonnel)?;
  state.roster.write().await.delete_person(&id)?;
  tracing::info!(%id, "person deleted");
  Ok(StatusCode::NO_CONTENT)
}
