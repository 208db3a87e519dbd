// stepwise/src/workflow/hooks.rs

//! Registration of `before`, `on` and `after` handlers.
//!
//! A handler may fail with any error type that converts into the workflow's
//! `Err`; the conversion happens once, when the handler's future resolves.

use crate::core::control::StepControl;
use crate::core::handler::Handler;
use crate::core::shared_context::SharedContext;
use crate::error::StepwiseError;
use crate::workflow::definition::Workflow;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

type HandlerFuture<Err> = Pin<Box<dyn Future<Output = Result<StepControl, Err>> + Send>>;

impl<TData, Err> Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<StepwiseError> + Send + Sync + 'static,
{
  /// Registers a handler that runs before the step's `on` handlers.
  pub fn before<F, HandlerErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(SharedContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StepControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    push_handler(&mut self.before, step_name, boxed(handler_fn));
  }

  /// Registers one of the step's main handlers.
  pub fn on<F, HandlerErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(SharedContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StepControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    push_handler(&mut self.on, step_name, boxed(handler_fn));
  }

  /// Registers a handler that runs once the step's `on` handlers all continued.
  pub fn after<F, HandlerErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(SharedContext<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<StepControl, HandlerErr>> + Send + 'static,
    HandlerErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    push_handler(&mut self.after, step_name, boxed(handler_fn));
  }

  /// Number of handlers registered for a step across all three phases.
  pub fn handler_count(&self, step_name: &str) -> usize {
    [&self.before, &self.on, &self.after]
      .iter()
      .filter_map(|phase| phase.get(step_name))
      .map(Vec::len)
      .sum()
  }
}

fn boxed<TData, Err, F, HandlerErr>(
  handler_fn: impl Fn(SharedContext<TData>) -> F + Send + Sync + 'static,
) -> Handler<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: 'static,
  F: Future<Output = Result<StepControl, HandlerErr>> + Send + 'static,
  HandlerErr: Into<Err> + Send + Sync + 'static,
{
  Box::new(move |ctx_data: SharedContext<TData>| -> HandlerFuture<Err> {
    let user_fut = handler_fn(ctx_data);
    Box::pin(async move { user_fut.await.map_err(Into::into) })
  })
}

fn push_handler<TData, Err>(
  phase: &mut HashMap<String, Vec<Handler<TData, Err>>>,
  step_name: &str,
  handler: Handler<TData, Err>,
) where
  TData: 'static + Send + Sync,
{
  phase.entry(step_name.to_string()).or_default().push(handler);
}
