// order_service/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order. Order creation only ever writes `Pending`;
/// moving an order on is left to other processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
  Pending,
}

impl OrderStatus {
  /// Text stored in the `orders.status` column.
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "PENDING",
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status '{0}'")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
  type Err = UnknownOrderStatus;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "PENDING" => Ok(OrderStatus::Pending),
      other => Err(UnknownOrderStatus(other.to_string())),
    }
  }
}

/// An order as returned to clients. Field names match the `orders` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub id: i64,
  pub product_id: String,
  pub quantity: i32,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}

/// Raw `orders` row; `status` is kept as text until it is parsed.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRecord {
  pub id: i64,
  pub product_id: String,
  pub quantity: i32,
  pub status: String,
  pub created_at: DateTime<Utc>,
}

impl TryFrom<OrderRecord> for Order {
  type Error = UnknownOrderStatus;

  fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
    Ok(Order {
      id: record.id,
      product_id: record.product_id,
      quantity: record.quantity,
      status: record.status.parse()?,
      created_at: record.created_at,
    })
  }
}
