// tests/shared_context_tests.rs
mod common;

use common::*;
use serial_test::serial;
use stepwise::{SharedContext, StepControl, StepwiseError, Workflow};

#[tokio::test]
#[serial]
async fn test_steps_see_each_others_writes() {
  setup_tracing();
  let mut workflow = Workflow::<TestContext, TestError>::new(&[("write", false, None), ("read_modify", false, None)]);

  workflow.on("write", |ctx: SharedContext<TestContext>| async move {
    let mut guard = ctx.write();
    guard.counter = 10;
    guard.message = "SetByWrite".to_string();
    Ok::<StepControl, StepwiseError>(StepControl::Continue)
  });

  workflow.on("read_modify", |ctx: SharedContext<TestContext>| async move {
    let mut guard = ctx.write();
    assert_eq!(guard.counter, 10);
    guard.counter += 5;
    guard.message.push_str("_ThenRead");
    Ok::<StepControl, StepwiseError>(StepControl::Continue)
  });

  let ctx = SharedContext::new(TestContext::default());
  workflow.run(ctx.clone()).await.unwrap();

  let guard = ctx.read();
  assert_eq!(guard.counter, 15);
  assert_eq!(guard.message, "SetByWrite_ThenRead");
}

#[test]
fn test_clone_shares_data() {
  let original = SharedContext::new(TestContext {
    counter: 1,
    ..Default::default()
  });
  let cloned = original.clone();
  cloned.write().counter = 2;
  assert_eq!(original.read().counter, 2);
}

#[test]
fn test_snapshot_is_detached() {
  let ctx = SharedContext::new(TestContext::default());
  let snap = ctx.snapshot();
  ctx.write().counter = 7;
  assert_eq!(snap.counter, 0);
  assert_eq!(ctx.with(|data| data.counter), 7);
}

#[test]
fn test_try_into_inner_requires_sole_owner() {
  let ctx = SharedContext::new(TestContext::default());
  let other = ctx.clone();

  let ctx = ctx.try_into_inner().expect_err("still shared");
  drop(other);
  let data = ctx.try_into_inner().expect("sole owner");
  assert_eq!(data.counter, 0);
}

#[test]
fn test_try_write_fails_while_read_guard_held() {
  let ctx = SharedContext::new(TestContext::default());
  let _reader = ctx.read();
  assert!(ctx.try_write().is_none());
  assert!(ctx.try_read().is_some());
}
