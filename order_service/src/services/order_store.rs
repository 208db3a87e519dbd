// order_service/src/services/order_store.rs

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, instrument};

use crate::models::{Order, OrderRecord, OrderStatus, UnknownOrderStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
  #[error("order {0} not found")]
  NotFound(i64),

  /// Connectivity problems, constraint violations, unreadable rows.
  #[error("order storage unavailable: {0}")]
  StorageUnavailable(String),
}

impl From<sqlx::Error> for StoreError {
  fn from(err: sqlx::Error) -> Self {
    StoreError::StorageUnavailable(err.to_string())
  }
}

impl From<UnknownOrderStatus> for StoreError {
  fn from(err: UnknownOrderStatus) -> Self {
    StoreError::StorageUnavailable(err.to_string())
  }
}

/// Durable home of orders. Ids and creation timestamps are assigned here.
#[async_trait]
pub trait OrderStore: Send + Sync {
  /// Creates an order. Two concurrent inserts never receive the same id.
  async fn insert(&self, product_id: &str, quantity: i32, status: OrderStatus) -> Result<Order, StoreError>;

  /// Every order, highest id first.
  async fn list_all(&self) -> Result<Vec<Order>, StoreError>;

  async fn get_by_id(&self, id: i64) -> Result<Order, StoreError>;
}

/// Postgres-backed store over the `orders` table.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
  pool: PgPool,
}

impl PgOrderStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

fn into_orders(records: Vec<OrderRecord>) -> Result<Vec<Order>, StoreError> {
  records
    .into_iter()
    .map(|record| Order::try_from(record).map_err(StoreError::from))
    .collect()
}

#[async_trait]
impl OrderStore for PgOrderStore {
  #[instrument(name = "order_store::insert", skip(self))]
  async fn insert(&self, product_id: &str, quantity: i32, status: OrderStatus) -> Result<Order, StoreError> {
    // Id comes from the BIGSERIAL sequence inside this one statement.
    let record: OrderRecord = sqlx::query_as(
      "INSERT INTO orders (product_id, quantity, status) VALUES ($1, $2, $3) \
       RETURNING id, product_id, quantity, status, created_at",
    )
    .bind(product_id)
    .bind(quantity)
    .bind(status.as_str())
    .fetch_one(&self.pool)
    .await
    .map_err(|e| {
      error!(error = %e, "Database error while inserting order.");
      StoreError::from(e)
    })?;

    Ok(Order::try_from(record)?)
  }

  #[instrument(name = "order_store::list_all", skip(self))]
  async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
    let records: Vec<OrderRecord> =
      sqlx::query_as("SELECT id, product_id, quantity, status, created_at FROM orders ORDER BY id DESC")
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
          error!(error = %e, "Database error while listing orders.");
          StoreError::from(e)
        })?;

    into_orders(records)
  }

  #[instrument(name = "order_store::get_by_id", skip(self))]
  async fn get_by_id(&self, id: i64) -> Result<Order, StoreError> {
    let record: Option<OrderRecord> =
      sqlx::query_as("SELECT id, product_id, quantity, status, created_at FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
          error!(error = %e, order_id = id, "Database error while fetching order.");
          StoreError::from(e)
        })?;

    match record {
      Some(record) => Ok(Order::try_from(record)?),
      None => Err(StoreError::NotFound(id)),
    }
  }
}
