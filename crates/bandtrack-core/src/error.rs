//! Error types for `bandtrack-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no record with id {0}")]
  NotFound(String),

  #[error("id {0} is already taken")]
  DuplicateId(String),

  #[error("malformed id: {0:?}")]
  InvalidId(String),

  #[error("no free ids remain in the {0} id range")]
  IdRangeExhausted(String),

  #[error("capacity transition would violate the id/capacity invariant: {0}")]
  InvalidCapacityTransition(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
