//! The order use cases and a service bundling them.

mod add_order_item;
mod create_order;
mod get_order;
mod list_orders;
mod remove_order_item;
mod update_order_status;

pub use add_order_item::AddOrderItem;
pub use create_order::CreateOrder;
pub use get_order::{GetOrder, OrderLookup};
pub use list_orders::ListOrders;
pub use remove_order_item::RemoveOrderItem;
pub use update_order_status::UpdateOrderStatus;

use common::OrderId;
use domain::{DomainError, Order, OrderRepository, RetailerRepository, Result};

/// Loads an order or fails with `NotFound`.
pub(crate) async fn load_order<O: OrderRepository>(orders: &O, id: OrderId) -> Result<Order> {
    orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Order", id))
}

/// All order use cases over one pair of repositories.
pub struct OrderService<O, R> {
    pub create_order: CreateOrder<O, R>,
    pub get_order: GetOrder<O>,
    pub list_orders: ListOrders<O>,
    pub update_order_status: UpdateOrderStatus<O>,
    pub add_order_item: AddOrderItem<O>,
    pub remove_order_item: RemoveOrderItem<O>,
}

impl<O, R> OrderService<O, R>
where
    O: OrderRepository + Clone,
    R: RetailerRepository,
{
    /// Creates every use case over the given repositories.
    pub fn new(orders: O, retailers: R) -> Self {
        Self {
            create_order: CreateOrder::new(orders.clone(), retailers),
            get_order: GetOrder::new(orders.clone()),
            list_orders: ListOrders::new(orders.clone()),
            update_order_status: UpdateOrderStatus::new(orders.clone()),
            add_order_item: AddOrderItem::new(orders.clone()),
            remove_order_item: RemoveOrderItem::new(orders),
        }
    }
}
