use common::OrderId;
use domain::{DomainError, OrderRepository, OrderResponse, Result};

use super::load_order;

/// How a caller identifies an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderLookup {
    Id(OrderId),
    OrderNumber(String),
}

/// Loads a single order.
pub struct GetOrder<O> {
    orders: O,
}

impl<O: OrderRepository> GetOrder<O> {
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, lookup: OrderLookup) -> Result<OrderResponse> {
        let order = match lookup {
            OrderLookup::Id(id) => load_order(&self.orders, id).await?,
            OrderLookup::OrderNumber(number) => self
                .orders
                .find_by_order_number(number.trim())
                .await?
                .ok_or_else(|| DomainError::not_found("Order", number))?,
        };
        OrderResponse::try_from(&order)
    }
}
