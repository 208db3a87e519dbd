// order_service/src/services/mod.rs

//! Collaborators of the order-creation workflow and the services built on them.

pub mod event_publisher;
pub mod order_orchestrator;
pub mod order_queries;
pub mod order_store;
pub mod product_verifier;

pub use event_publisher::{EventPublisher, KafkaEventPublisher, PublishError};
pub use order_orchestrator::{CreateOrderOutcome, OrderOrchestrator};
pub use order_queries::OrderQueryService;
pub use order_store::{OrderStore, PgOrderStore, StoreError};
pub use product_verifier::{HttpProductVerifier, ProductVerifier, VerifyError};
