// storefront_server/src/web/handlers/mod.rs

pub mod category_handlers;
pub mod product_handlers;
pub mod review_handlers;
pub mod user_handlers;
