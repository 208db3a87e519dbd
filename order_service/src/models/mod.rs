// order_service/src/models/mod.rs

//! Data structures for the persisted order, the product lookup answer and
//! the event announced on order creation.

pub mod event;
pub mod order;
pub mod product;

pub use event::{OrderCreatedEvent, OrderEventType};
pub use order::{Order, OrderRecord, OrderStatus, UnknownOrderStatus};
pub use product::ProductInfo;
