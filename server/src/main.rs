// storefront_server/src/main.rs

use std::sync::Arc;

use actix_web::{web as actix_data, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

use storefront::CredentialService;
use storefront_server::config::LogFormat;
use storefront_server::db::PgStore;
use storefront_server::web::configure_app_routes;
use storefront_server::{AppConfig, AppError, AppState};

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default level
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Pretty => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  let loaded = AppConfig::from_env();
  init_tracing(loaded.as_ref().map(|cfg| cfg.log_format).unwrap_or_default());

  tracing::info!("Starting storefront server...");

  if let Err(e) = run(loaded).await {
    tracing::error!(error = %e, "Server terminated with an error.");
    return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
  }
  Ok(())
}

async fn run(loaded: Result<AppConfig, AppError>) -> Result<(), AppError> {
  let app_config = loaded?;
  tracing::info!("Application configuration loaded successfully.");

  let db_pool = PgPoolOptions::new()
    .max_connections(app_config.db_max_connections)
    .connect(&app_config.database_url)
    .await?;
  tracing::info!("Successfully connected to the database.");

  if app_config.run_migrations {
    sqlx::migrate!("./migrations")
      .run(&db_pool)
      .await
      .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;
    tracing::info!("Database migrations applied.");
  }

  let credentials = CredentialService::new(
    app_config.jwt_secret.as_bytes(),
    chrono::Duration::minutes(app_config.access_token_ttl_minutes),
    chrono::Duration::days(app_config.refresh_token_ttl_days),
  );
  let app_state = AppState::new(Arc::new(PgStore::new(db_pool)), credentials);

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .map_err(|e| AppError::Internal(format!("Failed to bind {}: {}", server_address, e)))?
  .run()
  .await
  .map_err(|e| AppError::Internal(format!("Server error: {}", e)))
}
