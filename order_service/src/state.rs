// order_service/src/state.rs
use crate::pipelines::OrderDeps;
use crate::services::{EventPublisher, OrderOrchestrator, OrderQueryService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub orchestrator: OrderOrchestrator,
  pub queries: OrderQueryService,
  pub publisher: Arc<dyn EventPublisher>, // For the health check
}

impl AppState {
  pub fn new(deps: OrderDeps) -> Self {
    Self {
      queries: OrderQueryService::new(deps.store.clone()),
      publisher: deps.publisher.clone(),
      orchestrator: OrderOrchestrator::new(deps),
    }
  }
}
