//! Shared types for the delivery order service.

pub mod types;

pub use types::{OrderId, OrderItemId, RetailerId};
