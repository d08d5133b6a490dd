// storefront_server/src/web/routes.rs

use actix_web::{error, web, HttpResponse};
use serde_json::json;

use crate::errors::AppError;
use crate::web::handlers::{category_handlers, product_handlers, review_handlers, user_handlers};

async fn welcome_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "message": "Welcome to API!" }))
}

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "ok" }))
}

async fn notes_handler() -> HttpResponse {
  HttpResponse::Ok().json("Notes API is working")
}

// Malformed bodies, forms and queries answer with the same JSON error shape as the services.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(
      web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
      web::FormConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into()),
    )
    .app_data(
      web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req| {
        AppError::Validation(err.to_string()).into()
      }),
    );
}

// Called from `main.rs` and the HTTP tests to configure every service.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  extractor_configs(cfg);

  cfg
    .route("/", web::get().to(welcome_handler))
    .route("/health", web::get().to(health_check_handler))
    .route("/notes", web::get().to(notes_handler))
    .route("/notes/", web::get().to(notes_handler))
    // Categories
    .service(
      web::scope("/categories")
        .route("", web::get().to(category_handlers::list_categories_handler))
        .route("/", web::get().to(category_handlers::list_categories_handler))
        .route("", web::post().to(category_handlers::create_category_handler))
        .route("/", web::post().to(category_handlers::create_category_handler))
        .route("/{category_id}", web::put().to(category_handlers::update_category_handler))
        .route("/{category_id}/", web::put().to(category_handlers::update_category_handler))
        .route("/{category_id}", web::delete().to(category_handlers::delete_category_handler))
        .route("/{category_id}/", web::delete().to(category_handlers::delete_category_handler)),
    )
    // Products
    .service(
      web::scope("/products")
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("/", web::get().to(product_handlers::list_products_handler))
        .route("", web::post().to(product_handlers::create_product_handler))
        .route("/", web::post().to(product_handlers::create_product_handler))
        .route(
          "/category/{category_id}",
          web::get().to(product_handlers::products_in_category_handler),
        )
        .route(
          "/category/{category_id}/",
          web::get().to(product_handlers::products_in_category_handler),
        )
        .route(
          "/{product_id}/reviews",
          web::get().to(product_handlers::product_reviews_handler),
        )
        .route(
          "/{product_id}/reviews/",
          web::get().to(product_handlers::product_reviews_handler),
        )
        .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
        .route("/{product_id}/", web::get().to(product_handlers::get_product_handler))
        .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
        .route("/{product_id}/", web::put().to(product_handlers::update_product_handler))
        .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler))
        .route("/{product_id}/", web::delete().to(product_handlers::delete_product_handler)),
    )
    // Reviews
    .service(
      web::scope("/reviews")
        .route("", web::get().to(review_handlers::list_reviews_handler))
        .route("/", web::get().to(review_handlers::list_reviews_handler))
        .route("", web::post().to(review_handlers::create_review_handler))
        .route("/", web::post().to(review_handlers::create_review_handler))
        .route("/{review_id}", web::delete().to(review_handlers::delete_review_handler))
        .route("/{review_id}/", web::delete().to(review_handlers::delete_review_handler)),
    )
    // Users
    .service(
      web::scope("/users")
        .route("", web::post().to(user_handlers::register_handler))
        .route("/", web::post().to(user_handlers::register_handler))
        .route("/token", web::post().to(user_handlers::login_handler))
        .route("/token/", web::post().to(user_handlers::login_handler))
        .route("/refresh-token", web::post().to(user_handlers::refresh_token_handler))
        .route("/refresh-token/", web::post().to(user_handlers::refresh_token_handler)),
    );
}
