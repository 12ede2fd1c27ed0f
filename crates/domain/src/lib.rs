//! Domain layer for the delivery order service.
//!
//! This crate provides the order aggregate and everything it owns:
//! - Money and Address value objects
//! - The OrderStatus state machine
//! - OrderItem line items and the Order aggregate root
//! - Stored records and response projections
//! - Repository traits consumed by the use cases

pub mod error;
pub mod order;
pub mod query;
pub mod repository;

pub use common::{OrderId, OrderItemId, RetailerId};
pub use error::{DomainError, ErrorKind, Result};
pub use order::{
    Address, AddressProps, DEFAULT_CURRENCY, Money, NewOrder, NewOrderItem, Order, OrderItem,
    OrderItemRecord, OrderItemResponse, OrderRecord, OrderResponse, OrderStatus,
    PaginatedResponse, ProductId,
};
pub use query::{OrderFilters, Page, Pagination, SortField, SortOrder};
pub use repository::{OrderRepository, RetailerRepository};
