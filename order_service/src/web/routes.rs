// order_service/src/web/routes.rs

use actix_web::{error, web};

use crate::errors::{AppError, MALFORMED_JSON_BODY};
use crate::web::handlers::order_handlers;

/// Bodies that are not JSON get the same `{error}` shape as every other failure.
/// The body is parsed whatever the `Content-Type` says.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().content_type_required(false).error_handler(|err, _req| {
    tracing::info!(error = %err, "Rejected request body.");
    error::Error::from(AppError::InvalidRequest(MALFORMED_JSON_BODY))
  })
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(json_config())
    // `/health` is registered before `/{id}` so it is not taken for an order id.
    .route("/health", web::get().to(order_handlers::health_handler))
    .service(
      web::resource("/")
        .route(web::post().to(order_handlers::create_order_handler))
        .route(web::get().to(order_handlers::list_orders_handler)),
    )
    .route("/{id}", web::get().to(order_handlers::get_order_handler));
}
