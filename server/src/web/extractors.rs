// storefront_server/src/web/extractors.rs

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use storefront::User;

use crate::errors::AppError;
use crate::state::AppState;

/// The bearer token from `Authorization`, if the header carries one.
///
/// The scheme match is case-insensitive; anything else counts as no token.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
  let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
  let (scheme, token) = value.split_once(' ')?;
  if !scheme.eq_ignore_ascii_case("bearer") {
    return None;
  }
  Some(token.trim().to_string())
}

/// The active user behind the request's bearer token.
///
/// Extraction fails with 401 before the handler body runs; role and
/// ownership checks stay with the services.
#[derive(Debug)]
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let token = bearer_token(req);
    let state = req.app_data::<web::Data<AppState>>().cloned();

    Box::pin(async move {
      let state = state.ok_or_else(|| AppError::Internal("AppState is not registered".to_string()))?;
      if token.is_none() {
        debug!("Request carries no bearer token");
      }
      let user = state.storefront.gate.authenticate(token.as_deref()).await?;
      Ok(AuthenticatedUser(user))
    })
  }
}
