// order_service/src/models/event.rs

use super::order::{Order, OrderStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventType {
  OrderCreated,
}

/// Announcement that an order was stored. Snapshot of the order plus the
/// product title looked up while creating it. Never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedEvent {
  pub event: OrderEventType,
  pub order_id: i64,
  pub product_id: String,
  pub product_title: String,
  pub quantity: i32,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}

impl OrderCreatedEvent {
  pub fn new(order: &Order, product_title: &str) -> Self {
    Self {
      event: OrderEventType::OrderCreated,
      order_id: order.id,
      product_id: order.product_id.clone(),
      product_title: product_title.to_string(),
      quantity: order.quantity,
      status: order.status,
      created_at: order.created_at,
    }
  }

  /// Broker message key: the order id, so one order's events share a partition.
  pub fn message_key(&self) -> String {
    self.order_id.to_string()
  }
}
