// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper.

use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use order_service::models::{Order, OrderStatus, ProductInfo};
use order_service::pipelines::OrderDeps;
use order_service::services::{EventPublisher, OrderStore, ProductVerifier, PublishError, StoreError, VerifyError};
use order_service::state::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::Level;

pub const ORDERS_TOPIC: &str = "orders";

/// Knows a fixed set of products, or fails every lookup with `failure`.
#[derive(Default)]
pub struct FakeProductVerifier {
  products: Mutex<HashMap<String, ProductInfo>>,
  failure: Mutex<Option<VerifyError>>,
  pub calls: AtomicUsize,
}

impl FakeProductVerifier {
  pub fn with_product(self, product_id: &str, title: &str) -> Self {
    self
      .products
      .lock()
      .unwrap()
      .insert(product_id.to_string(), ProductInfo::titled(title));
    self
  }

  pub fn failing_with(self, failure: VerifyError) -> Self {
    *self.failure.lock().unwrap() = Some(failure);
    self
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ProductVerifier for FakeProductVerifier {
  async fn verify(&self, product_id: &str) -> Result<ProductInfo, VerifyError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if let Some(failure) = self.failure.lock().unwrap().clone() {
      return Err(failure);
    }
    self
      .products
      .lock()
      .unwrap()
      .get(product_id)
      .cloned()
      .ok_or_else(|| VerifyError::ProductNotFound(product_id.to_string()))
  }
}

/// Keeps orders in memory and assigns ids from 1 like a fresh sequence.
#[derive(Default)]
pub struct InMemoryOrderStore {
  orders: Mutex<Vec<Order>>,
  last_id: AtomicI64,
  fail_all: AtomicBool,
  pub insert_calls: AtomicUsize,
}

impl InMemoryOrderStore {
  pub fn failing() -> Self {
    let store = Self::default();
    store.fail_all.store(true, Ordering::SeqCst);
    store
  }

  pub fn insert_count(&self) -> usize {
    self.insert_calls.load(Ordering::SeqCst)
  }

  pub fn stored(&self) -> Vec<Order> {
    self.orders.lock().unwrap().clone()
  }

  fn check_available(&self) -> Result<(), StoreError> {
    if self.fail_all.load(Ordering::SeqCst) {
      return Err(StoreError::StorageUnavailable("connection refused".to_string()));
    }
    Ok(())
  }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
  async fn insert(&self, product_id: &str, quantity: i32, status: OrderStatus) -> Result<Order, StoreError> {
    self.insert_calls.fetch_add(1, Ordering::SeqCst);
    self.check_available()?;
    let order = Order {
      id: self.last_id.fetch_add(1, Ordering::SeqCst) + 1,
      product_id: product_id.to_string(),
      quantity,
      status,
      created_at: Utc::now(),
    };
    self.orders.lock().unwrap().push(order.clone());
    Ok(order)
  }

  async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
    self.check_available()?;
    let mut orders = self.stored();
    orders.sort_by(|a, b| b.id.cmp(&a.id));
    Ok(orders)
  }

  async fn get_by_id(&self, id: i64) -> Result<Order, StoreError> {
    self.check_available()?;
    self
      .stored()
      .into_iter()
      .find(|order| order.id == id)
      .ok_or(StoreError::NotFound(id))
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
  pub topic: String,
  pub key: String,
  pub payload: serde_json::Value,
}

/// Records what would have gone to the broker.
#[derive(Default)]
pub struct RecordingPublisher {
  connected: AtomicBool,
  reject_all: AtomicBool,
  messages: Mutex<Vec<PublishedMessage>>,
  pub publish_calls: AtomicUsize,
}

impl RecordingPublisher {
  pub fn connected() -> Self {
    let publisher = Self::default();
    publisher.connected.store(true, Ordering::SeqCst);
    publisher
  }

  /// Connected, but the broker rejects every message.
  pub fn rejecting() -> Self {
    let publisher = Self::connected();
    publisher.reject_all.store(true, Ordering::SeqCst);
    publisher
  }

  pub fn publish_count(&self) -> usize {
    self.publish_calls.load(Ordering::SeqCst)
  }

  pub fn messages(&self) -> Vec<PublishedMessage> {
    self.messages.lock().unwrap().clone()
  }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
  async fn connect(&self) -> Result<(), PublishError> {
    self.connected.store(true, Ordering::SeqCst);
    Ok(())
  }

  fn is_connected(&self) -> bool {
    self.connected.load(Ordering::SeqCst)
  }

  async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), PublishError> {
    self.publish_calls.fetch_add(1, Ordering::SeqCst);
    if !self.is_connected() {
      return Err(PublishError::NotConnected);
    }
    if self.reject_all.load(Ordering::SeqCst) {
      return Err(PublishError::PublishFailed("broker rejected message".to_string()));
    }
    self.messages.lock().unwrap().push(PublishedMessage {
      topic: topic.to_string(),
      key: key.to_string(),
      payload: serde_json::from_str(payload).expect("publisher received invalid JSON"),
    });
    Ok(())
  }
}

pub struct TestHarness {
  pub verifier: Arc<FakeProductVerifier>,
  pub store: Arc<InMemoryOrderStore>,
  pub publisher: Arc<RecordingPublisher>,
}

impl TestHarness {
  pub fn new(verifier: FakeProductVerifier, store: InMemoryOrderStore, publisher: RecordingPublisher) -> Self {
    Self {
      verifier: Arc::new(verifier),
      store: Arc::new(store),
      publisher: Arc::new(publisher),
    }
  }

  /// Product "p1" titled "Widget", empty store, connected publisher.
  pub fn widget_shop() -> Self {
    Self::new(
      FakeProductVerifier::default().with_product("p1", "Widget"),
      InMemoryOrderStore::default(),
      RecordingPublisher::connected(),
    )
  }

  pub fn deps(&self) -> OrderDeps {
    OrderDeps {
      verifier: self.verifier.clone(),
      store: self.store.clone(),
      publisher: self.publisher.clone(),
      orders_topic: ORDERS_TOPIC.to_string(),
    }
  }

  pub fn app_state(&self) -> AppState {
    AppState::new(self.deps())
  }
}

pub static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
