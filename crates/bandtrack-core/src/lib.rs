//! Core domain types and the in-memory roster for BandTrack.
//!
//! This crate is deliberately free of HTTP and runtime dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod access;
pub mod capacity;
pub mod error;
pub mod id;
pub mod ledger;
pub mod person;
pub mod roster;

pub use error::{Error, Result};
