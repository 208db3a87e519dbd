// order_service/src/services/order_queries.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::Order;
use crate::services::order_store::OrderStore;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Read side: straight pass-through to the store.
#[derive(Clone)]
pub struct OrderQueryService {
  store: Arc<dyn OrderStore>,
}

impl OrderQueryService {
  pub fn new(store: Arc<dyn OrderStore>) -> Self {
    Self { store }
  }

  #[instrument(name = "OrderQueryService::list", skip(self))]
  pub async fn list(&self) -> AppResult<Vec<Order>> {
    Ok(self.store.list_all().await?)
  }

  /// `id` is the raw path segment; anything that is not an integer is simply not found.
  #[instrument(name = "OrderQueryService::get", skip(self))]
  pub async fn get(&self, id: &str) -> AppResult<Order> {
    let order_id: i64 = id.trim().parse().map_err(|_| {
      debug!("Order id is not an integer.");
      AppError::OrderNotFound(id.to_string())
    })?;
    Ok(self.store.get_by_id(order_id).await?)
  }
}
