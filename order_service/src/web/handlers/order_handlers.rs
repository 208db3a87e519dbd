// order_service/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::create_order", skip(app_state, body))]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let outcome = app_state.orchestrator.create_order(body.into_inner()).await?;

  info!(
    order_id = outcome.order.id,
    event_published = outcome.event_published,
    stages = ?outcome.trail,
    "Order created."
  );
  Ok(HttpResponse::Created().json(outcome.order))
}

#[instrument(name = "handler::list_orders", skip(app_state))]
pub async fn list_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let orders = app_state.queries.list().await?;
  info!("Fetched {} orders.", orders.len());
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::get_order", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>, // Kept as text; non-integer ids are a plain 404
) -> Result<HttpResponse, AppError> {
  let order = app_state.queries.get(&path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(order))
}

pub async fn health_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(json!({
    "status": "ok",
    "broker_connected": app_state.publisher.is_connected(),
  }))
}
