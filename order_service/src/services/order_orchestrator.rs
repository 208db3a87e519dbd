// order_service/src/services/order_orchestrator.rs

use crate::errors::{AppError, Result as AppResult};
use crate::models::Order;
use crate::pipelines::contexts::{CreateOrderCtxData, OrderCreationStage, OrderDeps};
use crate::pipelines::create_order_pipeline::build_create_order_workflow;
use serde_json::Value;
use std::sync::Arc;
use stepwise::{SharedContext, Workflow, WorkflowOutcome};
use tracing::{error, instrument};

/// What a successful create-order run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderOutcome {
  pub order: Order,
  pub event_published: bool,
  /// Stages reached, ending in `Responded`.
  pub trail: Vec<OrderCreationStage>,
}

impl CreateOrderOutcome {
  pub fn final_stage(&self) -> OrderCreationStage {
    self.trail.last().copied().unwrap_or(OrderCreationStage::Received)
  }
}

/// Runs validate → verify → store → publish for each create request.
///
/// Holds no per-request state; every call gets a fresh context.
#[derive(Clone)]
pub struct OrderOrchestrator {
  workflow: Arc<Workflow<CreateOrderCtxData, AppError>>,
  deps: OrderDeps,
}

impl OrderOrchestrator {
  pub fn new(deps: OrderDeps) -> Self {
    Self::with_workflow(deps, build_create_order_workflow())
  }

  /// Uses a caller-adjusted workflow, e.g. one with extra audit steps.
  pub fn with_workflow(deps: OrderDeps, workflow: Workflow<CreateOrderCtxData, AppError>) -> Self {
    Self {
      workflow: Arc::new(workflow),
      deps,
    }
  }

  pub fn deps(&self) -> &OrderDeps {
    &self.deps
  }

  #[instrument(name = "OrderOrchestrator::create_order", skip_all)]
  pub async fn create_order(&self, payload: Value) -> AppResult<CreateOrderOutcome> {
    let ctx_data = SharedContext::new(CreateOrderCtxData::new(self.deps.clone(), payload));

    match self.workflow.run(ctx_data.clone()).await? {
      WorkflowOutcome::Completed => {}
      WorkflowOutcome::Stopped { step } => {
        error!(step = %step, "Create-order workflow stopped before storing an order.");
        return Err(AppError::Internal(format!("create-order workflow stopped at '{}'", step)));
      }
    }

    let mut guard = ctx_data.write();
    let order = guard
      .order
      .take()
      .ok_or_else(|| AppError::Internal("create-order workflow completed without an order".to_string()))?;
    guard.advance(OrderCreationStage::Responded);

    Ok(CreateOrderOutcome {
      order,
      event_published: guard.event_published,
      trail: guard.trail.clone(),
    })
  }
}
