//! `GET /api/profile` — the authenticated account and its permissions.

use axum::Json;

use bandtrack_core::access::{Permission, UserAccount};

use crate::{
  auth::{CurrentUser, require},
  error::Error,
};

pub async fn profile(
  CurrentUser(user): CurrentUser,
) -> Result<Json<UserAccount>, Error> {
  require(&user, Permission::ViewProfile)?;
  Ok(Json(user))
}
