// storefront_server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

impl std::str::FromStr for LogFormat {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "pretty" | "text" => Ok(LogFormat::Pretty),
      "json" => Ok(LogFormat::Json),
      other => Err(format!("unknown log format '{}'", other)),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub db_max_connections: u32,

  // Token signing
  pub jwt_secret: String,
  pub access_token_ttl_minutes: i64,
  pub refresh_token_ttl_days: i64,

  /// Apply `server/migrations` on startup.
  pub run_migrations: bool,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let required = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };
    let or_default = |var_name: &str, default: &str| lookup(var_name).unwrap_or_else(|| default.to_string());

    let server_host = or_default("SERVER_HOST", "127.0.0.1");
    let server_port = parse_var("SERVER_PORT", &or_default("SERVER_PORT", "8080"))?;
    let database_url = required("DATABASE_URL")?;
    let db_max_connections = parse_var("DB_MAX_CONNECTIONS", &or_default("DB_MAX_CONNECTIONS", "5"))?;

    let jwt_secret = required("JWT_SECRET")?;
    let access_token_ttl_minutes: i64 =
      parse_var("ACCESS_TOKEN_TTL_MINUTES", &or_default("ACCESS_TOKEN_TTL_MINUTES", "30"))?;
    let refresh_token_ttl_days: i64 = parse_var("REFRESH_TOKEN_TTL_DAYS", &or_default("REFRESH_TOKEN_TTL_DAYS", "7"))?;
    if access_token_ttl_minutes <= 0 || refresh_token_ttl_days <= 0 {
      return Err(AppError::Config("Token lifetimes must be positive".to_string()));
    }

    let run_migrations = parse_var("RUN_MIGRATIONS", &or_default("RUN_MIGRATIONS", "true"))?;
    let log_format = parse_var("LOG_FORMAT", &or_default("LOG_FORMAT", "pretty"))?;

    Ok(Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      jwt_secret,
      access_token_ttl_minutes,
      refresh_token_ttl_days,
      run_migrations,
      log_format,
    })
  }
}

fn parse_var<T>(var_name: &str, raw: &str) -> Result<T>
where
  T: std::str::FromStr,
  T::Err: std::fmt::Display,
{
  raw
    .parse::<T>()
    .map_err(|e| AppError::Config(format!("Invalid {}: {}", var_name, e)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |k| map.get(k).cloned()
  }

  #[test]
  fn defaults_fill_everything_but_secrets() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
      ("DATABASE_URL", "postgres://localhost/shop"),
      ("JWT_SECRET", "s3cret"),
    ]))
    .unwrap();
    assert_eq!(cfg.server_host, "127.0.0.1");
    assert_eq!(cfg.server_port, 8080);
    assert_eq!(cfg.db_max_connections, 5);
    assert_eq!(cfg.access_token_ttl_minutes, 30);
    assert_eq!(cfg.refresh_token_ttl_days, 7);
    assert!(cfg.run_migrations);
    assert_eq!(cfg.log_format, LogFormat::Pretty);
  }

  #[test]
  fn log_format_is_parsed() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
      ("DATABASE_URL", "postgres://localhost/shop"),
      ("JWT_SECRET", "s3cret"),
      ("LOG_FORMAT", "JSON"),
    ]))
    .unwrap();
    assert_eq!(cfg.log_format, LogFormat::Json);

    let err = AppConfig::from_lookup(lookup_from(&[
      ("DATABASE_URL", "postgres://localhost/shop"),
      ("JWT_SECRET", "s3cret"),
      ("LOG_FORMAT", "xml"),
    ]))
    .unwrap_err();
    assert!(matches!(err, AppError::Config(ref m) if m.contains("LOG_FORMAT")));
  }

  #[test]
  fn missing_secret_is_a_config_error() {
    let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/shop")])).unwrap_err();
    assert!(matches!(err, AppError::Config(ref m) if m.contains("JWT_SECRET")));
  }

  #[test]
  fn garbage_numbers_are_rejected() {
    let err = AppConfig::from_lookup(lookup_from(&[
      ("DATABASE_URL", "postgres://localhost/shop"),
      ("JWT_SECRET", "s3cret"),
      ("SERVER_PORT", "eighty"),
    ]))
    .unwrap_err();
    assert!(matches!(err, AppError::Config(ref m) if m.contains("SERVER_PORT")));

    let err = AppConfig::from_lookup(lookup_from(&[
      ("DATABASE_URL", "postgres://localhost/shop"),
      ("JWT_SECRET", "s3cret"),
      ("ACCESS_TOKEN_TTL_MINUTES", "0"),
    ]))
    .unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
  }
}
