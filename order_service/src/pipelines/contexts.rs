// order_service/src/pipelines/contexts.rs

//! Data carried through one run of the order-creation workflow.
//! Handlers receive it wrapped in `stepwise::SharedContext`.

use crate::models::{Order, ProductInfo};
use crate::services::{EventPublisher, OrderStore, ProductVerifier};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Long-lived collaborators shared by every request.
#[derive(Clone)]
pub struct OrderDeps {
  pub verifier: Arc<dyn ProductVerifier>,
  pub store: Arc<dyn OrderStore>,
  pub publisher: Arc<dyn EventPublisher>,
  pub orders_topic: String,
}

impl fmt::Debug for OrderDeps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("OrderDeps")
      .field("orders_topic", &self.orders_topic)
      .field("publisher_connected", &self.publisher.is_connected())
      .finish_non_exhaustive()
  }
}

/// Where a single order-creation request has got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderCreationStage {
  Received,
  Validated,
  ProductConfirmed,
  Stored,
  EventPublished,
  Responded,
}

/// A request body that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
  pub product_id: String,
  pub quantity: i32,
}

/// Underlying data for the create-order workflow (TData).
#[derive(Debug, Clone)]
pub struct CreateOrderCtxData {
  pub deps: OrderDeps,
  pub payload: Value,
  pub stage: OrderCreationStage,
  /// Every stage reached, in order, starting with `Received`.
  pub trail: Vec<OrderCreationStage>,
  pub request: Option<ValidatedOrder>,
  pub product: Option<ProductInfo>,
  pub order: Option<Order>,
  pub event_published: bool,
}

impl CreateOrderCtxData {
  pub fn new(deps: OrderDeps, payload: Value) -> Self {
    Self {
      deps,
      payload,
      stage: OrderCreationStage::Received,
      trail: vec![OrderCreationStage::Received],
      request: None,
      product: None,
      order: None,
      event_published: false,
    }
  }

  pub fn advance(&mut self, stage: OrderCreationStage) {
    self.stage = stage;
    self.trail.push(stage);
  }
}
