//! Order aggregate and related types.

mod aggregate;
mod item;
mod projection;
mod status;
mod value_objects;

pub use aggregate::{NewOrder, Order, OrderRecord};
pub use item::{NewOrderItem, OrderItem, OrderItemRecord};
pub use projection::{OrderItemResponse, OrderResponse, PaginatedResponse};
pub use status::OrderStatus;
pub use value_objects::{Address, AddressProps, DEFAULT_CURRENCY, Money, ProductId};
