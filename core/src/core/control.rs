// stepwise/src/core/control.rs

//! Signals for controlling workflow flow and the outcome of a workflow run.

/// Signal from a handler indicating whether the workflow should continue or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
  /// Continue with the remaining handlers of this step, then the next step.
  Continue,
  /// Halt the workflow. No further handlers (in this step or later ones) run.
  Stop,
}

/// Outcome of a workflow run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
  /// Every non-skipped step ran to the end.
  Completed,
  /// A handler of `step` returned `StepControl::Stop`.
  Stopped { step: String },
}

impl WorkflowOutcome {
  pub fn is_completed(&self) -> bool {
    matches!(self, WorkflowOutcome::Completed)
  }

  /// Name of the step that halted the run, if any.
  pub fn stopped_at(&self) -> Option<&str> {
    match self {
      WorkflowOutcome::Completed => None,
      WorkflowOutcome::Stopped { step } => Some(step.as_str()),
    }
  }
}
