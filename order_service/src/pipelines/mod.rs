// order_service/src/pipelines/mod.rs

//! Workflows run by the order service.

pub mod contexts;
pub mod create_order_pipeline;

pub use contexts::{CreateOrderCtxData, OrderCreationStage, OrderDeps, ValidatedOrder};
pub use create_order_pipeline::{build_create_order_workflow, validate_order_request};
