// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper.

use once_cell::sync::Lazy;
use std::future::Future;
use std::pin::Pin;
use stepwise::{Handler, SharedContext, StepControl, StepwiseError};
use tracing::Level;

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  // StepwiseError is not PartialEq, so keep its Debug rendering.
  #[error("Stepwise error: {0}")]
  Engine(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<StepwiseError> for TestError {
  fn from(err: StepwiseError) -> Self {
    TestError::Engine(format!("{:?}", err))
  }
}

type TestFuture = Pin<Box<dyn Future<Output = Result<StepControl, TestError>> + Send>>;

/// Bumps the counter, appends to the message and records `label`.
/// Stops the workflow when `should_stop_at` names this label.
pub fn create_simple_handler(label: &'static str, message_to_append: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: SharedContext<TestContext>| -> TestFuture {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(label.to_string());
      tracing::debug!(target: "test_handlers", step = %label, "executed, counter: {}", guard.counter);
      if guard.should_stop_at.as_deref() == Some(label) {
        return Ok(StepControl::Stop);
      }
      Ok(StepControl::Continue)
    })
  })
}

pub fn create_failing_handler(label: &'static str, error_message: &'static str) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: SharedContext<TestContext>| -> TestFuture {
    Box::pin(async move {
      ctx.write().steps_executed.push(label.to_string());
      tracing::warn!(target: "test_handlers", step = %label, "failing with: '{}'", error_message);
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

/// Awaits a short sleep before recording `label`, so the lock is taken only
/// after a real suspension point.
pub fn create_sleeping_handler(label: &'static str, millis: u64) -> Handler<TestContext, TestError> {
  Box::new(move |ctx: SharedContext<TestContext>| -> TestFuture {
    Box::pin(async move {
      tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
      ctx.write().steps_executed.push(label.to_string());
      Ok(StepControl::Continue)
    })
  })
}

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
