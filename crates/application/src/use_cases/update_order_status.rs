use common::OrderId;
use domain::{OrderRepository, OrderResponse, Result};

use super::load_order;
use crate::input::{UpdateStatusInput, Validate};

/// Moves an order along its lifecycle.
pub struct UpdateOrderStatus<O> {
    orders: O,
}

impl<O: OrderRepository> UpdateOrderStatus<O> {
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    /// Applies the requested transition. Aggregate rule failures are returned unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: OrderId, input: UpdateStatusInput) -> Result<OrderResponse> {
        let target = input.validate()?;

        let mut order = load_order(&self.orders, id).await?;
        let previous = order.status();
        order.transition_to(target.as_str())?;
        let order = self.orders.update(order).await?;

        metrics::counter!("order_status_transitions_total", "status" => target.as_str())
            .increment(1);
        tracing::info!(
            order_id = %id,
            from = %previous,
            to = %order.status(),
            "order status updated"
        );
        OrderResponse::try_from(&order)
    }
}
