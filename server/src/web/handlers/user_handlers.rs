// storefront_server/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};

use storefront::UserDraft;

use crate::errors::AppError;
use crate::state::AppState;

/// OAuth2 password-grant form; `username` carries the email.
#[derive(Deserialize)]
pub struct LoginForm {
  pub username: String,
  pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshQuery {
  pub refresh_token: String,
}

#[instrument(name = "handler::register", skip(app_state, payload), fields(email = %payload.email, role = %payload.role))]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<UserDraft>,
) -> Result<HttpResponse, AppError> {
  let user = app_state.storefront.accounts.register(payload.into_inner()).await?;
  info!(user_id = user.id, "User registered.");
  Ok(HttpResponse::Created().json(user))
}

#[instrument(name = "handler::login", skip(app_state, form), fields(email = %form.username))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
  let LoginForm { username, password } = form.into_inner();
  let tokens = app_state.storefront.accounts.login(&username, &password).await?;
  Ok(HttpResponse::Ok().json(tokens))
}

#[instrument(name = "handler::refresh_token", skip(app_state, query))]
pub async fn refresh_token_handler(
  app_state: web::Data<AppState>,
  query: web::Query<RefreshQuery>,
) -> Result<HttpResponse, AppError> {
  let token = app_state.storefront.accounts.refresh(&query.refresh_token).await?;
  Ok(HttpResponse::Ok().json(token))
}
