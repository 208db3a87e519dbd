// order_service/src/pipelines/create_order_pipeline.rs

use crate::errors::{AppError, PRODUCT_ID_REQUIRED, QUANTITY_MUST_BE_POSITIVE, QUANTITY_TOO_LARGE};
use crate::models::{OrderCreatedEvent, OrderStatus};
use crate::pipelines::contexts::{CreateOrderCtxData, OrderCreationStage, ValidatedOrder};
use serde_json::Value;
use stepwise::{SharedContext, StepControl, Workflow};
use tracing::{event, info, warn, Level};

pub const VALIDATE_REQUEST: &str = "validate_request";
pub const VERIFY_PRODUCT: &str = "verify_product";
pub const STORE_ORDER: &str = "store_order";
pub const PUBLISH_ORDER_CREATED: &str = "publish_order_created";

/// Checks a create-order body. `productId` is checked first.
///
/// `productId` may be a non-empty string or a non-zero number (kept as its
/// decimal text). `quantity` must be a JSON integer of at least 1.
pub fn validate_order_request(payload: &Value) -> Result<ValidatedOrder, AppError> {
  let product_id = match payload.get("productId") {
    Some(Value::String(id)) if !id.is_empty() => id.clone(),
    Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v != 0.0) => n.to_string(),
    _ => return Err(AppError::InvalidRequest(PRODUCT_ID_REQUIRED)),
  };

  let quantity = match payload.get("quantity") {
    Some(Value::Number(n)) => {
      if let Some(q) = n.as_i64() {
        if q < 1 {
          return Err(AppError::InvalidRequest(QUANTITY_MUST_BE_POSITIVE));
        }
        i32::try_from(q).map_err(|_| AppError::InvalidRequest(QUANTITY_TOO_LARGE))?
      } else if n.as_u64().is_some() {
        return Err(AppError::InvalidRequest(QUANTITY_TOO_LARGE));
      } else {
        return Err(AppError::InvalidRequest(QUANTITY_MUST_BE_POSITIVE));
      }
    }
    _ => return Err(AppError::InvalidRequest(QUANTITY_MUST_BE_POSITIVE)),
  };

  Ok(ValidatedOrder { product_id, quantity })
}

async fn validate_request(ctx_data: SharedContext<CreateOrderCtxData>) -> Result<StepControl, AppError> {
  let validated = validate_order_request(&ctx_data.read().payload);
  let validated = validated.map_err(|e| {
    info!(error = %e, "Rejected create-order request.");
    e
  })?;

  event!(Level::DEBUG, product_id = %validated.product_id, quantity = validated.quantity, "Order request validated.");
  {
    let mut guard = ctx_data.write();
    guard.request = Some(validated);
    guard.advance(OrderCreationStage::Validated);
  }
  Ok(StepControl::Continue)
}

async fn verify_product(ctx_data: SharedContext<CreateOrderCtxData>) -> Result<StepControl, AppError> {
  let (product_id, verifier) = {
    // Read scope
    let guard = ctx_data.read();
    let request = guard
      .request
      .as_ref()
      .ok_or_else(|| AppError::Internal("verify_product ran before validation".to_string()))?;
    (request.product_id.clone(), guard.deps.verifier.clone())
  };

  let product = verifier.verify(&product_id).await.map_err(|e| {
    warn!(error = %e, product_id = %product_id, "Product verification failed.");
    AppError::from(e)
  })?;

  info!(product_id = %product_id, title = %product.title, "Product confirmed.");
  {
    let mut guard = ctx_data.write();
    guard.product = Some(product);
    guard.advance(OrderCreationStage::ProductConfirmed);
  }
  Ok(StepControl::Continue)
}

async fn store_order(ctx_data: SharedContext<CreateOrderCtxData>) -> Result<StepControl, AppError> {
  let (request, store) = {
    let guard = ctx_data.read();
    let request = guard
      .request
      .clone()
      .ok_or_else(|| AppError::Internal("store_order ran before validation".to_string()))?;
    (request, guard.deps.store.clone())
  };

  let order = store
    .insert(&request.product_id, request.quantity, OrderStatus::Pending)
    .await?;

  info!(order_id = order.id, product_id = %order.product_id, "Order stored.");
  {
    let mut guard = ctx_data.write();
    guard.order = Some(order);
    guard.advance(OrderCreationStage::Stored);
  }
  Ok(StepControl::Continue)
}

/// Announces the stored order. A failed publish is logged and swallowed:
/// the order stays stored and the request still succeeds.
async fn publish_order_created(ctx_data: SharedContext<CreateOrderCtxData>) -> Result<StepControl, AppError> {
  let (event, publisher, topic) = {
    let guard = ctx_data.read();
    let (Some(order), Some(product)) = (guard.order.as_ref(), guard.product.as_ref()) else {
      return Err(AppError::Internal(
        "publish_order_created ran without a stored order".to_string(),
      ));
    };
    (
      OrderCreatedEvent::new(order, &product.title),
      guard.deps.publisher.clone(),
      guard.deps.orders_topic.clone(),
    )
  };

  let payload = match serde_json::to_string(&event) {
    Ok(payload) => payload,
    Err(e) => {
      warn!(error = %e, order_id = event.order_id, "Could not encode ORDER_CREATED event.");
      return Ok(StepControl::Continue);
    }
  };

  match publisher.publish(&topic, &event.message_key(), &payload).await {
    Ok(()) => {
      info!(order_id = event.order_id, topic = %topic, "ORDER_CREATED event published.");
      let mut guard = ctx_data.write();
      guard.event_published = true;
      guard.advance(OrderCreationStage::EventPublished);
    }
    Err(e) => {
      warn!(error = %e, order_id = event.order_id, topic = %topic, "Failed to publish ORDER_CREATED event; order kept.");
    }
  }
  Ok(StepControl::Continue)
}

/// Builds the create-order workflow. Built once and shared by all requests.
pub fn build_create_order_workflow() -> Workflow<CreateOrderCtxData, AppError> {
  let mut workflow = Workflow::<CreateOrderCtxData, AppError>::new(&[
    (VALIDATE_REQUEST, false, None),
    (VERIFY_PRODUCT, false, None),
    (STORE_ORDER, false, None),
    (PUBLISH_ORDER_CREATED, true, None),
  ]);

  workflow.on(VALIDATE_REQUEST, validate_request);
  workflow.on(VERIFY_PRODUCT, verify_product);
  workflow.on(STORE_ORDER, store_order);
  workflow.on(PUBLISH_ORDER_CREATED, publish_order_created);

  workflow
}
