// stepwise/src/workflow/mod.rs

//! The `Workflow<TData, Err>` type: declaration, handler registration and execution.

pub mod definition;
pub mod execution;
pub mod hooks;

pub use definition::Workflow;
