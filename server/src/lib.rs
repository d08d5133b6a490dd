// storefront_server/src/lib.rs

//! HTTP surface of the storefront: actix-web routes over the domain core,
//! backed by PostgreSQL in production.

pub mod config;
pub mod db;
pub mod errors;
pub mod state;
pub mod web;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;
