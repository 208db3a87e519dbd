// order_service/src/services/event_publisher.rs

use async_trait::async_trait;
use rdkafka::{
  config::ClientConfig,
  producer::{FutureProducer, FutureRecord, Producer},
  util::Timeout,
};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
  #[error("event channel is not connected")]
  NotConnected,

  #[error("could not connect to broker: {0}")]
  ConnectFailed(String),

  #[error("broker rejected or did not accept the message: {0}")]
  PublishFailed(String),
}

/// Fire-and-forget delivery of events to named channels.
///
/// `connect` is called once at process start. Until it succeeds every
/// `publish` fails with [`PublishError::NotConnected`]. Nothing is retried
/// or buffered.
#[async_trait]
pub trait EventPublisher: Send + Sync {
  async fn connect(&self) -> Result<(), PublishError>;

  fn is_connected(&self) -> bool;

  /// Returns once the broker accepted the message; consumers are not awaited.
  async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), PublishError>;
}

/// Kafka-protocol publisher (Kafka, Redpanda).
pub struct KafkaEventPublisher {
  brokers: String,
  delivery_timeout: Duration,
  producer: OnceLock<FutureProducer>,
}

impl KafkaEventPublisher {
  pub fn new(brokers: &str) -> Self {
    Self {
      brokers: brokers.to_string(),
      delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
      producer: OnceLock::new(),
    }
  }

  /// Bounds both the startup metadata probe and each message's delivery.
  pub fn with_delivery_timeout(mut self, delivery_timeout: Duration) -> Self {
    self.delivery_timeout = delivery_timeout;
    self
  }

  pub fn brokers(&self) -> &str {
    &self.brokers
  }
}

impl std::fmt::Debug for KafkaEventPublisher {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("KafkaEventPublisher")
      .field("brokers", &self.brokers)
      .field("delivery_timeout", &self.delivery_timeout)
      .field("connected", &self.is_connected())
      .finish()
  }
}

#[async_trait]
impl EventPublisher for KafkaEventPublisher {
  #[instrument(name = "event_publisher::connect", skip(self), fields(brokers = %self.brokers))]
  async fn connect(&self) -> Result<(), PublishError> {
    if self.is_connected() {
      return Ok(());
    }

    let producer: FutureProducer = ClientConfig::new()
      .set("bootstrap.servers", &self.brokers)
      .set("message.timeout.ms", self.delivery_timeout.as_millis().to_string())
      .create()
      .map_err(|e| PublishError::ConnectFailed(e.to_string()))?;

    // Creating the producer does not touch the network; a metadata request does.
    let probe = producer.clone();
    let probe_timeout = self.delivery_timeout;
    tokio::task::spawn_blocking(move || probe.client().fetch_metadata(None, probe_timeout).map(|_| ()))
      .await
      .map_err(|e| PublishError::ConnectFailed(e.to_string()))?
      .map_err(|e| {
        warn!(error = %e, "Broker metadata probe failed.");
        PublishError::ConnectFailed(e.to_string())
      })?;

    // A concurrent connect may have won; either producer is fine.
    let _ = self.producer.set(producer);
    info!("Connected to broker.");
    Ok(())
  }

  fn is_connected(&self) -> bool {
    self.producer.get().is_some()
  }

  #[instrument(name = "event_publisher::publish", skip(self, payload))]
  async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), PublishError> {
    let producer = self.producer.get().ok_or(PublishError::NotConnected)?;

    let record = FutureRecord::to(topic).key(key).payload(payload);
    producer
      .send(record, Timeout::After(self.delivery_timeout))
      .await
      .map_err(|(e, _)| PublishError::PublishFailed(e.to_string()))?;

    info!("Published event.");
    Ok(())
  }
}
