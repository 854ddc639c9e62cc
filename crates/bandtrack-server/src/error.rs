//! API error type and its [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use bandtrack_core::access::Permission;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,

  #[error("missing permission: {0}")]
  Forbidden(Permission),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),
}

impl From<bandtrack_core::Error> for Error {
  fn from(e: bandtrack_core::Error) -> Self {
    use bandtrack_core::Error as Core;
    match e {
      Core::NotFound(id) => Error::NotFound(id),
      Core::InvalidId(id) => Error::BadRequest(format!("malformed id {id:?}")),
      Core::DuplicateId(id) => Error::Conflict(format!("duplicate id {id}")),
      Core::IdRangeExhausted(range) => {
        Error::Conflict(format!("no free ids remain in the {range} id range"))
      }
      Core::InvalidCapacityTransition(detail) => Error::Conflict(detail),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
      Error::Forbidden(_) => StatusCode::FORBIDDEN,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      Error::Conflict(_) => StatusCode::CONFLICT,
    };
    let mut res =
      (status, Json(json!({ "error": self.to_string() }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"bandtrack\""),
      );
    }
    res
  }
}
