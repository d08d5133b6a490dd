// storefront_server/src/errors.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use storefront::StorefrontError;

#[derive(Debug, Error)]
pub enum AppError {
  /// Malformed request body, query or form, rejected before reaching a service.
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("{source}")]
  Domain {
    #[from]
    source: StorefrontError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<sqlx::Error>() {
      Ok(sqlx_err) => AppError::Sqlx(sqlx_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::Domain { source } => match source {
        StorefrontError::NotFound(_) => StatusCode::NOT_FOUND,
        StorefrontError::Forbidden(_) => StatusCode::FORBIDDEN,
        StorefrontError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        StorefrontError::Conflict(_) | StorefrontError::Validation(_) => StatusCode::BAD_REQUEST,
        StorefrontError::Credential(_) | StorefrontError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
      },
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Log the full error when it's turned into a response
    if status.is_server_error() {
      tracing::error!(application_error = ?self, "Responding with server error");
    } else {
      tracing::warn!(application_error = %self, %status, "Responding with client error");
    }

    let mut builder = HttpResponse::build(status);
    match self {
      AppError::Validation(m) => builder.json(json!({"error": m})),
      AppError::Domain { source } => match source {
        StorefrontError::Unauthenticated(m) => builder
          .insert_header(("WWW-Authenticate", "Bearer"))
          .json(json!({"error": m})),
        StorefrontError::Credential(_) | StorefrontError::Storage { .. } => {
          builder.json(json!({"error": "An internal error occurred"}))
        }
        other => builder.json(json!({"error": other.to_string()})),
      },
      AppError::Sqlx(_) => builder.json(json!({"error": "Database operation failed"})),
      AppError::Config(_) | AppError::Internal(_) => builder.json(json!({"error": "An internal error occurred"})),
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
