// stepwise/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepwiseError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Step '{step_name}' failed. Source: {source}")]
  StepFailed {
    step_name: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Error in user-provided handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal stepwise error: {0}")]
  Internal(String),
}

impl StepwiseError {
  /// Attaches the failing step's name to an error raised inside a handler.
  pub fn in_step(step_name: impl Into<String>, source: impl Into<AnyhowError>) -> Self {
    StepwiseError::StepFailed {
      step_name: step_name.into(),
      source: source.into(),
    }
  }
}

impl From<AnyhowError> for StepwiseError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a StepwiseError that was boxed into anyhow on its way up,
    // so callers can still match on the original variant.
    match err.downcast::<StepwiseError>() {
      Ok(inner) => inner,
      Err(source) => StepwiseError::HandlerError { source },
    }
  }
}

pub type StepwiseResult<T, E = StepwiseError> = std::result::Result<T, E>;
