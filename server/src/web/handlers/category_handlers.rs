// storefront_server/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use storefront::CategoryDraft;

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = app_state.storefront.catalog.list_categories().await?;
  Ok(HttpResponse::Ok().json(categories))
}

#[instrument(
  name = "handler::create_category",
  skip(app_state, payload),
  fields(name = %payload.name, parent_id = ?payload.parent_id)
)]
pub async fn create_category_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CategoryDraft>,
) -> Result<HttpResponse, AppError> {
  let category = app_state.storefront.catalog.create_category(payload.into_inner()).await?;
  info!(category_id = category.id, "Category created.");
  Ok(HttpResponse::Created().json(category))
}

#[instrument(name = "handler::update_category", skip(app_state, payload), fields(category_id = %path.as_ref()))]
pub async fn update_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  payload: web::Json<CategoryDraft>,
) -> Result<HttpResponse, AppError> {
  let category = app_state
    .storefront
    .catalog
    .update_category(path.into_inner(), payload.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(category))
}

#[instrument(name = "handler::delete_category", skip(app_state), fields(category_id = %path.as_ref()))]
pub async fn delete_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  app_state.storefront.catalog.deactivate_category(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({
    "status": "success",
    "message": "Category marked as inactive"
  })))
}
