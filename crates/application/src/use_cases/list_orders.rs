use domain::{OrderRepository, OrderResponse, PaginatedResponse, Result};

use crate::input::{ListOrdersInput, Validate};

/// Lists orders page by page.
pub struct ListOrders<O> {
    orders: O,
}

impl<O: OrderRepository> ListOrders<O> {
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        input: ListOrdersInput,
    ) -> Result<PaginatedResponse<OrderResponse>> {
        let (filters, pagination) = input.validate()?;

        let retailer_only = filters.customer_id.is_none()
            && filters.status.is_none()
            && filters.order_number.is_none()
            && filters.created_from.is_none()
            && filters.created_to.is_none();

        let page = match filters.retailer_id {
            Some(retailer_id) if retailer_only => {
                self.orders
                    .find_by_retailer_id(retailer_id, &pagination)
                    .await?
            }
            _ => self.orders.find_all(&filters, &pagination).await?,
        };

        tracing::debug!(total = page.total, page = page.page, "orders listed");
        PaginatedResponse::try_from_page(page, |order| OrderResponse::try_from(order))
    }
}
