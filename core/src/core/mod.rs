pub mod control;
pub mod handler;
pub mod shared_context;
pub mod step;

pub use control::{StepControl, WorkflowOutcome};
pub use handler::Handler;
pub use shared_context::SharedContext;
pub use step::StepDef;
