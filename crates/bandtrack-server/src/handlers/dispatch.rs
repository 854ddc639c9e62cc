//! Handlers for `/api/dispatches`.
//!
//! The original dispatch screen is gated whole on `manageDispatch`, viewing
//! included, so both endpoints require it.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use bandtrack_core::{
  access::Permission,
  ledger::{MaterialDispatch, NewDispatch},
};

use crate::{
  AppState,
  auth::{CurrentUser, require},
  error::Error,
};

/// `GET /api/dispatches`
pub async fn list(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<MaterialDispatch>>, Error> {
  require(&user, Permission::ManageDispatch)?;
  let ledger = state.ledger.read().await;
  Ok(Json(ledger.dispatches().to_vec()))
}

/// `POST /api/dispatches` — resolves the subcontractor's display name from
/// the roster; 404 for an unknown subcontractor id.
pub async fn create(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Json(input): Json<NewDispatch>,
) -> Result<impl IntoResponse, Error> {
  require(&user, Permission::ManageDispatch)?;

  let name = {
    let roster = state.roster.read().await;
    roster
      .find_subcontractor(&input.subcontractor_id)
      .map(|s| s.name.clone())
      .ok_or_else(|| {
        Error::NotFound(format!(
          "subcontractor {} not found",
          input.subcontractor_id
        ))
      })?
  };

  let dispatch = state.ledger.write().await.log_dispatch(input, Some(name));
  tracing::info!(
    id = %dispatch.id,
    subcontractor = %dispatch.subcontractor_id,
    quantity = dispatch.quantity,
    "dispatch logged"
  );
  Ok((StatusCode::CREATED, Json(dispatch)))
}
