// order_service/src/config.rs

use crate::errors::{AppError, Result};
use crate::services::product_verifier::DEFAULT_PRODUCT_SERVICE_URL;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,

  pub product_service_url: String,
  pub product_service_timeout: Duration,

  pub broker_url: String,
  pub orders_topic: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|var_name| env::var(var_name).ok())
  }

  /// Builds the config from any variable source. `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      lookup(var_name).ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8003".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let database_max_connections = get_env("DATABASE_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;

    let product_service_url =
      get_env("PRODUCT_SERVICE_URL").unwrap_or_else(|_| DEFAULT_PRODUCT_SERVICE_URL.to_string());
    let product_service_timeout = get_env("PRODUCT_SERVICE_TIMEOUT_MS")
      .unwrap_or_else(|_| "5000".to_string())
      .parse::<u64>()
      .map(Duration::from_millis)
      .map_err(|e| AppError::Config(format!("Invalid PRODUCT_SERVICE_TIMEOUT_MS: {}", e)))?;

    let broker_url = get_env("BROKER_URL").unwrap_or_else(|_| "broker:9092".to_string());
    let orders_topic = get_env("ORDERS_TOPIC").unwrap_or_else(|_| "orders".to_string());
    if orders_topic.trim().is_empty() {
      return Err(AppError::Config("ORDERS_TOPIC must not be empty".to_string()));
    }

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      product_service_url,
      product_service_timeout,
      broker_url,
      orders_topic,
    })
  }
}
