// storefront_core/src/model/user.rs

use serde::{Deserialize, Serialize};

use super::Role;
use crate::error::{StorefrontError, StorefrontResult};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
  pub id: i64,
  pub email: String,
  #[serde(skip_serializing)] // Never send password hash to client
  pub hashed_password: String,
  pub role: Role,
  pub is_active: bool,
}

/// Registration payload. `role` falls back to buyer when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDraft {
  pub email: String,
  pub password: String,
  #[serde(default)]
  pub role: Role,
}

impl UserDraft {
  pub fn validate(&self) -> StorefrontResult<()> {
    if !looks_like_email(&self.email) {
      return Err(StorefrontError::validation("A valid email address is required"));
    }
    if self.password.chars().count() < MIN_PASSWORD_LEN {
      return Err(StorefrontError::validation(format!(
        "Password must be at least {} characters long",
        MIN_PASSWORD_LEN
      )));
    }
    Ok(())
  }
}

/// Row handed to the store once the password has been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email: String,
  pub hashed_password: String,
  pub role: Role,
}

fn looks_like_email(candidate: &str) -> bool {
  let Some((local, domain)) = candidate.split_once('@') else {
    return false;
  };
  !local.is_empty()
    && !domain.contains('@')
    && domain.contains('.')
    && !domain.starts_with('.')
    && !domain.ends_with('.')
    && !candidate.chars().any(char::is_whitespace)
}
