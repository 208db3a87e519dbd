// stepwise/src/lib.rs

//! Stepwise: a small asynchronous step-workflow engine.
//!
//! A [`Workflow`] is an ordered list of named steps run against one shared,
//! lockable context ([`SharedContext`]). Each step has three handler phases
//! (`before`, `on`, `after`). Handlers are async and return a [`StepControl`]:
//!  - `Continue` moves on to the next handler / step.
//!  - `Stop` halts the whole run and reports which step stopped it.
//!  - An `Err` aborts the run immediately and is handed back to the caller unchanged.
//!
//! Steps can be declared optional (no handler required) and can carry a skip
//! condition evaluated against the context right before the step runs.

pub mod core;
pub mod error;
pub mod workflow;

pub use crate::core::control::{StepControl, WorkflowOutcome};
pub use crate::core::handler::Handler;
pub use crate::core::shared_context::SharedContext;
pub use crate::core::step::{SkipCondition, StepDef};

pub use crate::workflow::definition::Workflow;

pub use crate::error::{StepwiseError, StepwiseResult};

/*
    Typical use:
    1. Define a context struct `MyCtx` holding the request input, the
       collaborators the steps call, and slots for intermediate results.
    2. Declare a `Workflow<MyCtx, MyError>` with its step names, in order.
    3. Attach handlers with `.on("step", ...)` (and `.before` / `.after` if needed).
    4. Per request: wrap a fresh `MyCtx` in `SharedContext::new`, call
       `workflow.run(ctx.clone()).await`, then read the results out of `ctx`.
*/
