// storefront_core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Message shared by every authentication failure so callers cannot tell
/// which check rejected them.
pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";

#[derive(Debug, Error)]
pub enum StorefrontError {
  /// Referenced entity is absent or inactive.
  #[error("{0}")]
  NotFound(String),

  /// Role or ownership mismatch. The message names what the operation requires.
  #[error("{0}")]
  Forbidden(String),

  /// Missing, malformed, tampered or expired token, or the token's user is gone.
  #[error("{0}")]
  Unauthenticated(String),

  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  Validation(String),

  /// The hashing or token machinery itself failed (not a user mistake).
  #[error("Credential processing failed: {0}")]
  Credential(String),

  #[error("Storage backend failed. Source: {source}")]
  Storage {
    #[source]
    source: AnyhowError,
  },
}

impl StorefrontError {
  pub fn not_found(what: impl Into<String>) -> Self {
    StorefrontError::NotFound(what.into())
  }

  pub fn forbidden(why: impl Into<String>) -> Self {
    StorefrontError::Forbidden(why.into())
  }

  pub fn validation(why: impl Into<String>) -> Self {
    StorefrontError::Validation(why.into())
  }

  /// The one authentication failure callers ever see.
  pub fn unauthenticated() -> Self {
    StorefrontError::Unauthenticated(INVALID_CREDENTIALS.to_string())
  }
}

impl From<AnyhowError> for StorefrontError {
  fn from(err: AnyhowError) -> Self {
    StorefrontError::Storage { source: err }
  }
}

pub type StorefrontResult<T, E = StorefrontError> = std::result::Result<T, E>;
