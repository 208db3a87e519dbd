// stepwise/src/workflow/execution.rs

//! `Workflow::run()`: executes the declared steps against a shared context.

use crate::core::control::{StepControl, WorkflowOutcome};
use crate::core::handler::Handler;
use crate::core::shared_context::SharedContext;
use crate::error::StepwiseError;
use crate::workflow::definition::Workflow;
use tracing::{event, info_span, instrument, Instrument, Level};

/// Which of a step's handler lists is running. Only used for logging.
#[derive(Debug, Clone, Copy)]
enum Phase {
  Before,
  On,
  After,
}

impl Phase {
  fn as_str(self) -> &'static str {
    match self {
      Phase::Before => "before",
      Phase::On => "on",
      Phase::After => "after",
    }
  }
}

impl<TData, Err> Workflow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<StepwiseError> + Send + Sync + 'static,
{
  /// Executes the workflow against `ctx_data`.
  ///
  /// Steps run strictly in declaration order, each one only after the
  /// previous one finished. For every step:
  /// 1. the skip condition (if any) is evaluated; `true` skips the step;
  /// 2. a step with no handlers at all is skipped when optional, and fails
  ///    with [`StepwiseError::HandlerMissing`] otherwise;
  /// 3. `before`, `on` and `after` handlers run in registration order.
  ///
  /// A handler returning `Stop` ends the run with [`WorkflowOutcome::Stopped`].
  /// A handler error ends the run and is returned as-is; nothing is retried.
  #[instrument(
    name = "Workflow::run",
    skip_all,
    fields(
      context_data_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: SharedContext<TData>) -> Result<WorkflowOutcome, Err> {
    event!(Level::DEBUG, "Workflow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let step_span = info_span!(
        "workflow_step",
        step_name = step_name,
        step_index = step_idx,
        optional = step_def.optional
      );

      if let Some(skip_cond) = &step_def.skip_if {
        if skip_cond(ctx_data.clone()) {
          step_span.in_scope(|| event!(Level::INFO, "Step skipped due to 'skip_if' condition."));
          continue;
        }
      }

      let before = non_empty(self.before.get(step_name));
      let on = non_empty(self.on.get(step_name));
      let after = non_empty(self.after.get(step_name));

      if before.is_none() && on.is_none() && after.is_none() {
        if step_def.optional {
          step_span.in_scope(|| event!(Level::DEBUG, "Optional step has no handlers, skipping."));
          continue;
        }
        step_span.in_scope(|| event!(Level::ERROR, "Non-optional step has no handlers."));
        return Err(Err::from(StepwiseError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      let step_control = run_step([before, on, after], &ctx_data).instrument(step_span).await?;

      if step_control == StepControl::Stop {
        return Ok(WorkflowOutcome::Stopped {
          step: step_def.name.clone(),
        });
      }
    }

    event!(Level::DEBUG, "Workflow execution completed.");
    Ok(WorkflowOutcome::Completed)
  }
}

fn non_empty<T>(handlers: Option<&Vec<T>>) -> Option<&[T]> {
  handlers.filter(|v| !v.is_empty()).map(Vec::as_slice)
}

async fn run_step<TData, Err>(
  phases: [Option<&[Handler<TData, Err>]>; 3],
  ctx_data: &SharedContext<TData>,
) -> Result<StepControl, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  for (phase, handlers) in [Phase::Before, Phase::On, Phase::After].into_iter().zip(phases) {
    if let Some(handlers) = handlers {
      if run_phase(phase, handlers, ctx_data).await? == StepControl::Stop {
        return Ok(StepControl::Stop);
      }
    }
  }
  event!(Level::DEBUG, "Step finished.");
  Ok(StepControl::Continue)
}

async fn run_phase<TData, Err>(
  phase: Phase,
  handlers: &[Handler<TData, Err>],
  ctx_data: &SharedContext<TData>,
) -> Result<StepControl, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  for (handler_idx, handler_fn) in handlers.iter().enumerate() {
    match handler_fn(ctx_data.clone()).await {
      Ok(StepControl::Continue) => {}
      Ok(StepControl::Stop) => {
        event!(Level::INFO, phase = phase.as_str(), handler_index = handler_idx, "Workflow stopped by handler.");
        return Ok(StepControl::Stop);
      }
      Err(e) => {
        event!(Level::ERROR, phase = phase.as_str(), handler_index = handler_idx, error = %e, "Handler failed.");
        return Err(e);
      }
    }
  }
  Ok(StepControl::Continue)
}
