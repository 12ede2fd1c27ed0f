use common::OrderId;
use domain::{DomainError, OrderRepository, OrderResponse, ProductId, Result};

use super::load_order;

/// Removes a line item from an open order.
pub struct RemoveOrderItem<O> {
    orders: O,
}

impl<O: OrderRepository> RemoveOrderItem<O> {
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, order_id: OrderId, product_id: &str) -> Result<OrderResponse> {
        let product_id = product_id.trim();
        if product_id.is_empty() {
            return Err(DomainError::validation("productId", "is required"));
        }
        let product_id = ProductId::new(product_id);

        let mut order = load_order(&self.orders, order_id).await?;
        order.remove_item(&product_id)?;
        let order = self.orders.update(order).await?;

        metrics::counter!("order_items_removed_total").increment(1);
        tracing::info!(order_id = %order_id, product_id = %product_id, "order item removed");
        OrderResponse::try_from(&order)
    }
}
