// order_service/src/main.rs

use order_service::config::AppConfig;
use order_service::pipelines::OrderDeps;
use order_service::services::{EventPublisher, HttpProductVerifier, KafkaEventPublisher, PgOrderStore};
use order_service::state::AppState;
use order_service::web::configure_app_routes;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))) // RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting order service...");

  let app_config = AppConfig::from_env().map_err(|e| {
    tracing::error!(error = %e, "Failed to load application configuration.");
    e
  })?;

  // Connections are opened on first use, so a database outage fails requests rather than startup.
  let db_pool = PgPoolOptions::new()
    .max_connections(app_config.database_max_connections)
    .acquire_timeout(Duration::from_secs(5))
    .connect_lazy(&app_config.database_url)
    .context("Invalid DATABASE_URL")?;

  let verifier = HttpProductVerifier::new(&app_config.product_service_url, app_config.product_service_timeout)?;
  tracing::info!(url = %verifier.base_url(), "Product service client ready.");

  let publisher = Arc::new(KafkaEventPublisher::new(&app_config.broker_url));
  if let Err(e) = publisher.connect().await {
    // Keep serving; every publish fails until restart.
    tracing::error!(error = %e, brokers = %app_config.broker_url, "Failed to connect to broker.");
  }

  let app_state = AppState::new(OrderDeps {
    verifier: Arc::new(verifier),
    store: Arc::new(PgOrderStore::new(db_pool)),
    publisher,
    orders_topic: app_config.orders_topic.clone(),
  });

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  Ok(())
}
