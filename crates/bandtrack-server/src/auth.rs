//! HTTP Basic-auth verification and the authenticated-user extractor.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use serde::Deserialize;

use bandtrack_core::access::{Permission, UserAccount};

use crate::{AppState, error::Error};

/// One configured login, with the permissions it resolves to.
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub permissions:   Vec<Permission>,
}

/// The set of logins this server instance accepts.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
  pub users: Vec<UserEntry>,
}

/// Verify credentials from headers and resolve the matching account.
pub fn verify_auth(
  headers: &HeaderMap,
  config: &AuthConfig,
) -> Result<UserAccount, Error> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  let entry = config
    .users
    .iter()
    .find(|u| u.username == username)
    .ok_or(Error::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&entry.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(UserAccount {
    username:    entry.username.clone(),
    permissions: entry.permissions.clone(),
  })
}

/// Extractor: present in a handler means the request was authenticated.
pub struct CurrentUser(pub UserAccount);

impl FromRequestParts<AppState> for CurrentUser {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState,
  ) -> Result<Self, Self::Rejection> {
    let user = verify_auth(&parts.headers, &state.auth)?;
    Ok(CurrentUser(user))
  }
}

/// Gate a handler on one permission.
pub fn require(user: &UserAccount, permission: Permission) -> Result<(), Error> {
  if user.can(permission) {
    Ok(())
  } else {
    Err(Error::Forbidden(permission))
  }
}
