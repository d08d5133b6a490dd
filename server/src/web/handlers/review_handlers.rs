// storefront_server/src/web/handlers/review_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use storefront::ReviewDraft;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::list_reviews", skip(app_state))]
pub async fn list_reviews_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let reviews = app_state.storefront.reviews.list_reviews().await?;
  Ok(HttpResponse::Ok().json(reviews))
}

#[instrument(
  name = "handler::create_review",
  skip(app_state, auth_user, payload),
  fields(user_id = auth_user.0.id, product_id = payload.product_id, grade = payload.grade)
)]
pub async fn create_review_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  payload: web::Json<ReviewDraft>,
) -> Result<HttpResponse, AppError> {
  let review = app_state
    .storefront
    .reviews
    .create_review(&auth_user.0, payload.into_inner())
    .await?;
  info!(review_id = review.id, "Review created, rating recomputed.");
  Ok(HttpResponse::Created().json(review))
}

#[instrument(
  name = "handler::delete_review",
  skip(app_state, auth_user),
  fields(user_id = auth_user.0.id, review_id = %path.as_ref())
)]
pub async fn delete_review_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let review = app_state
    .storefront
    .reviews
    .deactivate_review(&auth_user.0, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(review))
}
