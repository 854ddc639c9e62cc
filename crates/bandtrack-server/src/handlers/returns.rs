//! Handlers for `/api/returns`.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use bandtrack_core::{
  access::Permission,
  ledger::{MaterialReturn, NewReturn},
};

use crate::{
  AppState,
  auth::{CurrentUser, require},
  error::Error,
};

/// `GET /api/returns`
pub async fn list(
  State(state): State<AppState>,
  CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<MaterialReturn>>, Error> {
  let ledger = state.ledger.read().await;
  Ok(Json(ledger.returns().to_vec()))
}

/// `POST /api/returns`
pub async fn create(
  State(state): State<AppState>,
  CurrentUser(user): CurrentUser,
  Json(input): Json<NewReturn>,
) -> Result<impl IntoResponse, Error> {
  require(&user, Permission::ManageReturns)?;

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

  let ret = state.ledger.write().await.log_return(input, Some(name));
  tracing::info!(
    id = %ret.id,
    subcontractor = %ret.subcontractor_id,
    status = ?ret.quality_status,
    "return logged"
  );
  Ok((StatusCode::CREATED, Json(ret)))
}
