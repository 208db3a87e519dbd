// stepwise/src/core/handler.rs

use crate::core::control::StepControl;
use crate::core::shared_context::SharedContext;
use std::future::Future;
use std::pin::Pin;

/// A boxed step handler.
///
/// A handler receives its own clone of the run's `SharedContext<TData>` and
/// resolves to `Result<StepControl, Err>`. Handlers read what they need out
/// of the context, drop the guard, perform their I/O, then take a write guard
/// to record results. Guards must never be held across an `.await`.
pub type Handler<TData, Err> = Box<
  dyn Fn(SharedContext<TData>) -> Pin<Box<dyn Future<Output = Result<StepControl, Err>> + Send>>
    + Send
    + Sync,
>;
