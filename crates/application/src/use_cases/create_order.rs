use domain::{
    Address, DomainError, NewOrder, Order, OrderItem, OrderRepository, OrderResponse,
    RetailerRepository, Result,
};

use crate::input::{CreateOrderInput, Validate};

/// Opens a new order for an existing retailer.
pub struct CreateOrder<O, R> {
    orders: O,
    retailers: R,
}

impl<O: OrderRepository, R: RetailerRepository> CreateOrder<O, R> {
    pub fn new(orders: O, retailers: R) -> Self {
        Self { orders, retailers }
    }

    /// Validates the input, builds the order with its items and stores it.
    #[tracing::instrument(skip(self, input), fields(retailer_id = %input.retailer_id))]
    pub async fn execute(&self, input: CreateOrderInput) -> Result<OrderResponse> {
        let command = input.validate()?;

        if !self.retailers.exists(command.retailer_id).await? {
            return Err(DomainError::not_found("Retailer", command.retailer_id));
        }

        let delivery_address = Address::new(command.delivery_address)?;
        let mut order = Order::create(NewOrder {
            retailer_id: command.retailer_id,
            customer_id: command.customer_id,
            customer_name: command.customer_name,
            customer_email: command.customer_email,
            delivery_address,
            notes: command.notes,
        })?;

        for item in command.items {
            order.add_item(OrderItem::new(item)?)?;
        }

        let order = self.orders.create(order).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(
            order_id = %order.id(),
            order_number = order.order_number(),
            items = order.item_count(),
            "order created"
        );
        OrderResponse::try_from(&order)
    }
}
