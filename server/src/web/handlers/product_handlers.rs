// storefront_server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use storefront::ProductDraft;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.storefront.catalog.list_products().await?;
  info!("Fetched {} active products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.storefront.catalog.get_product(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::products_in_category", skip(app_state), fields(category_id = %path.as_ref()))]
pub async fn products_in_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let products = app_state
    .storefront
    .catalog
    .products_in_category(path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(
  name = "handler::create_product",
  skip(app_state, auth_user, payload),
  fields(user_id = auth_user.0.id, category_id = payload.category_id)
)]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  payload: web::Json<ProductDraft>,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .storefront
    .catalog
    .create_product(&auth_user.0, payload.into_inner())
    .await?;
  info!(product_id = product.id, "Product created.");
  Ok(HttpResponse::Created().json(product))
}

#[instrument(
  name = "handler::update_product",
  skip(app_state, auth_user, payload),
  fields(user_id = auth_user.0.id, product_id = %path.as_ref())
)]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
  payload: web::Json<ProductDraft>,
) -> Result<HttpResponse, AppError> {
  let product = app_state
    .storefront
    .catalog
    .update_product(&auth_user.0, path.into_inner(), payload.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(
  name = "handler::delete_product",
  skip(app_state, auth_user),
  fields(user_id = auth_user.0.id, product_id = %path.as_ref())
)]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  app_state
    .storefront
    .catalog
    .deactivate_product(&auth_user.0, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({
    "status": "success",
    "message": "Product marked as inactive"
  })))
}

#[instrument(name = "handler::product_reviews", skip(app_state), fields(product_id = %path.as_ref()))]
pub async fn product_reviews_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let reviews = app_state.storefront.reviews.product_reviews(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(reviews))
}
