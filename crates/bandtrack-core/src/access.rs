//! Role-based permission model.
//!
//! The core never checks permissions on its own operations; it trusts its
//! caller. The server resolves a [`UserAccount`] during authentication and
//! gates each handler with [`UserAccount::can`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named capability. `FullAccess` implies every other permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
  ViewDashboard,
  ViewProfile,
  ManagePersonnel,
  ManageDispatch,
  ManageReturns,
  FullAccess,
}

impl fmt::Display for Permission {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::ViewDashboard => "viewDashboard",
      Self::ViewProfile => "viewProfile",
      Self::ManagePersonnel => "managePersonnel",
      Self::ManageDispatch => "manageDispatch",
      Self::ManageReturns => "manageReturns",
      Self::FullAccess => "fullAccess",
    };
    f.write_str(s)
  }
}

/// An authenticated user together with their resolved permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
  pub username:    String,
  pub permissions: Vec<Permission>,
}

impl UserAccount {
  pub fn can(&self, permission: Permission) -> bool {
    self.permissions.contains(&Permission::FullAccess)
      || self.permissions.contains(&permission)
  }
}
