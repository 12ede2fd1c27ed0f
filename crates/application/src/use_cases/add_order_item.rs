use common::OrderId;
use domain::{OrderItem, OrderRepository, OrderResponse, Result};

use super::load_order;
use crate::input::{AddItemInput, Validate};

/// Adds a line item to an open order.
pub struct AddOrderItem<O> {
    orders: O,
}

impl<O: OrderRepository> AddOrderItem<O> {
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    #[tracing::instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn execute(&self, order_id: OrderId, input: AddItemInput) -> Result<OrderResponse> {
        let item = OrderItem::new(input.validate()?)?;
        let product_id = item.product_id().clone();

        let mut order = load_order(&self.orders, order_id).await?;
        order.add_item(item)?;
        let order = self.orders.update(order).await?;
        let response = OrderResponse::try_from(&order)?;

        metrics::counter!("order_items_added_total").increment(1);
        tracing::info!(
            order_id = %order_id,
            product_id = %product_id,
            total = %response.total_amount,
            "order item added"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::UpdateStatusInput;
    use crate::use_cases::test_support::{create_input, item_input, service};
    use domain::ErrorKind;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn adds_and_merges_items() {
        let (service, _, retailer_id) = service();
        let created = service
            .create_order
            .execute(create_input(retailer_id, vec![item_input("SKU-1", 2, 1000)]))
            .await
            .unwrap();

        let response = service
            .add_order_item
            .execute(created.id, item_input("SKU-2", 3, 500))
            .await
            .unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.total_amount, Decimal::new(3500, 2));

        let response = service
            .add_order_item
            .execute(created.id, item_input("SKU-1", 1, 1000))
            .await
            .unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].quantity, 3);
        assert_eq!(response.items[0].id, created.items[0].id);
    }

    #[tokio::test]
    async fn confirmed_order_rejects_new_items() {
        let (service, _, retailer_id) = service();
        let created = service
            .create_order
            .execute(create_input(retailer_id, vec![item_input("SKU-1", 1, 1000)]))
            .await
            .unwrap();
        service
            .update_order_status
            .execute(created.id, UpdateStatusInput::new("CONFIRMED"))
            .await
            .unwrap();

        let err = service
            .add_order_item
            .execute(created.id, item_input("SKU-2", 1, 1000))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BusinessRuleViolation);
    }

    #[tokio::test]
    async fn merge_past_decimal_range_leaves_order_unchanged() {
        let (service, orders, retailer_id) = service();
        let mut item = item_input("SKU-1", 2, 0);
        item.unit_price = "30000000000000000000000000000".parse().unwrap();
        let created = service
            .create_order
            .execute(create_input(retailer_id, vec![item.clone()]))
            .await
            .unwrap();

        item.quantity = 1;
        let err = service
            .add_order_item
            .execute(created.id, item)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let stored = orders.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.version(), created.version);
        assert_eq!(stored.items()[0].quantity(), 2);
    }

    #[tokio::test]
    async fn invalid_item_is_rejected() {
        let (service, _, retailer_id) = service();
        let created = service
            .create_order
            .execute(create_input(retailer_id, vec![]))
            .await
            .unwrap();

        let err = service
            .add_order_item
            .execute(created.id, item_input("SKU-1", 0, 1000))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
