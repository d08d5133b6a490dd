// storefront_core/src/model/role.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StorefrontError;

/// Closed set of account roles. Fixed when the account is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[default]
  Buyer,
  Seller,
  Admin,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Role::Buyer => "buyer",
      Role::Seller => "seller",
      Role::Admin => "admin",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Role {
  type Err = StorefrontError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "buyer" => Ok(Role::Buyer),
      "seller" => Ok(Role::Seller),
      "admin" => Ok(Role::Admin),
      other => Err(StorefrontError::validation(format!(
        "Unknown role '{}': expected buyer, seller or admin",
        other
      ))),
    }
  }
}
