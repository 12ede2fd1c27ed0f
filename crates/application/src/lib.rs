//! Use cases for the delivery order service.
//!
//! Each use case is a stateless coordinator: it loads an order through a
//! repository, invokes one aggregate operation, persists the result and
//! returns a response projection. Errors from the aggregate propagate as-is.

pub mod input;
pub mod use_cases;

pub use input::{
    AddItemInput, CreateOrderCommand, CreateOrderInput, ListOrdersInput, OrderItemInput,
    UpdateStatusInput, Validate,
};
pub use use_cases::{
    AddOrderItem, CreateOrder, GetOrder, ListOrders, OrderLookup, OrderService, RemoveOrderItem,
    UpdateOrderStatus,
};
